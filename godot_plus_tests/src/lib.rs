// Demo classes for the end-to-end registration tests.
//
// These are ordinary user classes written the way an extension author would
// write them: `#[derive(Class)]` for the manifest, `#[methods]` for the
// method set, and an embedded `Node2DImpl` standing in for the host's
// `Node2D` capability. Nothing here is test-specific; the same classes
// would register against a real host through any `ClassDb`.
//
// - `SimpleNode2D`: one plain property, one method, one virtual hook.
// - `MyNode2D`: renamed property, custom read-only getter, private state
//   and a signal with a typed argument, emitted whenever the secret is
//   printed.
// - `BrokenNode`: a getter returning two values. Preparation rejects it,
//   which must not stop the other classes from loading.
//
// See also: `tests/full_pipeline.rs` for the scenarios.

use godot_plus::{Class, Registry, Signal, Vector2, methods};

// ---------------------------------------------------------------------------
// Base capability
// ---------------------------------------------------------------------------

/// Stand-in for the host's `Node2D` instance binding.
#[derive(Debug, Default)]
pub struct Node2DImpl {
    position: Vector2,
}

#[methods(base = "Node2D")]
impl Node2DImpl {
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn get_position(&self) -> Vector2 {
        self.position
    }
}

// ---------------------------------------------------------------------------
// Demo classes
// ---------------------------------------------------------------------------

#[derive(Class, Debug)]
pub struct SimpleNode2D {
    #[godot(base)]
    node: Node2DImpl,
    pub speed: i64,
    secret: String,
}

impl Default for SimpleNode2D {
    fn default() -> Self {
        Self {
            node: Node2DImpl::default(),
            speed: 0,
            secret: "123".into(),
        }
    }
}

#[methods]
impl SimpleNode2D {
    pub fn get_speed(&self) -> i64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: i64) {
        self.speed = speed;
    }

    pub fn move_(&mut self, vec: Vector2) {
        self.node.set_position(vec * self.speed as f32);
    }

    pub fn x_ready(&mut self) {
        tracing::info!(secret = self.secret(), "ready");
        self.speed = 100;
    }

    fn secret(&self) -> &str {
        &self.secret
    }
}

impl SimpleNode2D {
    pub fn position(&self) -> Vector2 {
        self.node.get_position()
    }
}

#[derive(Class, Debug)]
pub struct MyNode2D {
    #[godot(base)]
    node: Node2DImpl,
    #[godot(name = "speed2")]
    pub speed: i64,
    #[godot(get = "my_direction", set = nil)]
    pub direction: Vector2,
    secret: String,
    #[godot(args = "printed:bool")]
    pub secret_printed: Signal,
}

impl Default for MyNode2D {
    fn default() -> Self {
        Self {
            node: Node2DImpl::default(),
            speed: 10,
            direction: Vector2::ZERO,
            secret: "123".into(),
            secret_printed: Signal::default(),
        }
    }
}

#[methods]
impl MyNode2D {
    pub fn set_speed(&mut self, speed: i64) {
        self.speed = speed;
    }

    pub fn get_speed(&self) -> i64 {
        self.speed
    }

    pub fn my_direction(&self) -> Vector2 {
        self.direction
    }

    pub fn move_(&mut self, vec: Vector2) {
        self.node.set_position(vec * self.speed as f32);
        self.print_secret();
    }

    pub fn x_ready(&mut self) {
        self.speed *= 10;
    }

    fn print_secret(&self) {
        tracing::info!(secret = %self.secret, "secret");
        self.secret_printed.emit(&[true.into()]);
    }
}

// Outside `#[methods]`, so never exposed to the host.
impl MyNode2D {
    pub fn position(&self) -> Vector2 {
        self.node.get_position()
    }
}

#[derive(Class, Debug, Default)]
pub struct BrokenNode {
    pub heading: f64,
}

#[methods]
impl BrokenNode {
    pub fn get_heading(&self) -> (f64, f64) {
        (self.heading, -self.heading)
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }
}

/// Every demo class, in registration order.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_class::<SimpleNode2D>()
        .register_class::<MyNode2D>()
        .register_class::<BrokenNode>();
    registry
}

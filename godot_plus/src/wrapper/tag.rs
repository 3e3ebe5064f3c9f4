// Field annotation parser.
//
// A field annotation is a comma-separated list of `key=value` segments:
//
//   name=speed2              exposed name override
//   get=my_direction         getter accessor override
//   set=my_setter | set=nil  setter accessor override, or "no setter"
//   args=who:String|n:int    signal argument shapes
//
// Parsing is deliberately permissive: unknown keys and malformed segments
// (no `=`, more than one `=`, empty value) are skipped without error, so an
// annotation written for a newer version still loads. Do not turn these
// into hard errors. Interpreting values (e.g. the read-only sentinel) is the
// caller's job; this module only splits.

/// Parse result of one field's annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagData {
    pub name: Option<String>,
    pub getter: Option<String>,
    pub setter: Option<String>,
    pub args: Option<String>,
}

/// Parse an annotation string. Returns `None` for an empty annotation.
pub fn parse_tag(tag: &str) -> Option<TagData> {
    if tag.trim().is_empty() {
        return None;
    }

    let mut data = TagData::default();
    for segment in tag.split(',') {
        let parts: Vec<&str> = segment.split('=').collect();
        let [key, value] = parts.as_slice() else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let slot = match key.trim() {
            "name" => &mut data.name,
            "get" => &mut data.getter,
            "set" => &mut data.setter,
            "args" => &mut data.args,
            _ => continue,
        };
        *slot = Some(value.to_string());
    }
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotation_is_none() {
        assert_eq!(parse_tag(""), None);
        assert_eq!(parse_tag("   "), None);
    }

    #[test]
    fn parses_known_keys() {
        let data = parse_tag("name=speed2,get=MyDirection,set=nil").unwrap();
        assert_eq!(data.name.as_deref(), Some("speed2"));
        assert_eq!(data.getter.as_deref(), Some("MyDirection"));
        assert_eq!(data.setter.as_deref(), Some("nil"));
        assert_eq!(data.args, None);
    }

    #[test]
    fn ignores_unknown_and_malformed_segments() {
        let data = parse_tag("color=red,name,get=a=b,,set=,name=ok").unwrap();
        assert_eq!(
            data,
            TagData {
                name: Some("ok".into()),
                ..TagData::default()
            }
        );
    }

    #[test]
    fn annotation_with_only_garbage_is_empty_data() {
        assert_eq!(parse_tag("whatever"), Some(TagData::default()));
    }

    #[test]
    fn later_segment_wins() {
        let data = parse_tag("name=a,name=b").unwrap();
        assert_eq!(data.name.as_deref(), Some("b"));
    }

    #[test]
    fn trims_whitespace_around_keys_and_values() {
        let data = parse_tag(" name = speed , args = who:String|n:int ").unwrap();
        assert_eq!(data.name.as_deref(), Some("speed"));
        assert_eq!(data.args.as_deref(), Some("who:String|n:int"));
    }
}

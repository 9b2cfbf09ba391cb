//! Dot-joined change paths
//!
//! Segments are map keys or keyed-list ids. A literal `.` or `\` inside a
//! segment is escaped with `\`. The empty path addresses the root.

pub const SEPARATOR: char = '.';
const ESCAPE: char = '\\';

pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push(SEPARATOR);
        }
        for ch in segment.as_ref().chars() {
            if ch == SEPARATOR || ch == ESCAPE {
                path.push(ESCAPE);
            }
            path.push(ch);
        }
    }
    path
}

pub fn split(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            SEPARATOR => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segments() {
        let path = join(&["components", "hero", "styles", "layout", "width"]);
        assert_eq!(path, "components.hero.styles.layout.width");
        assert_eq!(split(&path), vec!["components", "hero", "styles", "layout", "width"]);
    }

    #[test]
    fn test_dots_in_keys_are_escaped() {
        let segments = vec!["props".to_string(), "data.src".to_string(), "a\\b".to_string()];
        let path = join(&segments);
        assert_eq!(path, r"props.data\.src.a\\b");
        assert_eq!(split(&path), segments);
    }

    #[test]
    fn test_root_path_is_empty() {
        assert_eq!(join::<&str>(&[]), "");
        assert!(split("").is_empty());
    }
}

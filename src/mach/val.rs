/// A stream value as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", n),
            Val::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Val::Number(6.0).to_string(), "6");
        assert_eq!(Val::Number(0.5).to_string(), "0.5");
        assert_eq!(Val::Text("hello".into()).to_string(), "hello");
    }
}

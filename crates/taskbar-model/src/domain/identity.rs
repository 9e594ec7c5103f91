use std::fmt;

use serde::{Deserialize, Serialize};

/// Field separator of the encoded form. A literal separator inside a field is doubled.
pub const SEPARATOR: char = ',';

/// Canonical identity of a task: the ordered list of its semantically significant fields.
///
/// Equality is structural over the field list, so a field containing the separator never collides with two shorter fields.
/// The encoded form is the host's execution-id format: every field escaped and followed by one separator. It does not split
/// back unambiguously, so runtime ids are only ever compared in encoded form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskIdentity(Vec<String>);

impl TaskIdentity {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.0.push(field.into());
    }

    pub fn with(mut self, field: impl Into<String>) -> Self {
        self.push(field);
        self
    }

    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy with the field at `index` replaced.
    pub fn replaced(&self, index: usize, field: impl Into<String>) -> Self {
        let mut out = self.clone();
        if let Some(slot) = out.0.get_mut(index) {
            *slot = field.into();
        }
        out
    }

    /// Copy without the leading field.
    pub fn tail(&self) -> Self {
        Self(self.0.iter().skip(1).cloned().collect())
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        for field in &self.0 {
            for c in field.chars() {
                out.push(c);
                if c == SEPARATOR {
                    out.push(SEPARATOR);
                }
            }
            out.push(SEPARATOR);
        }
        out
    }
}

impl fmt::Display for TaskIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<S: Into<String>> FromIterator<S> for TaskIdentity {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_host_format() {
        let id: TaskIdentity = ["shell", "make", "all"].into_iter().collect();
        assert_eq!(id.encode(), "shell,make,all,");
    }

    #[test]
    fn separator_inside_field_is_doubled() {
        let joined: TaskIdentity = ["a,b"].into_iter().collect();
        let split: TaskIdentity = ["a", "b"].into_iter().collect();

        assert_eq!(joined.encode(), "a,,b,");
        assert_eq!(split.encode(), "a,b,");
        assert_ne!(joined, split);
        assert_ne!(joined.encode(), split.encode());
    }

    #[test]
    fn leading_separator_encodes_like_a_trailing_one() {
        let id: TaskIdentity = ["shell", "echo", ",x"].into_iter().collect();
        let shifted: TaskIdentity = ["shell", "echo,", "x"].into_iter().collect();

        assert_eq!(id.encode(), "shell,echo,,,x,");
        assert_eq!(shifted.encode(), id.encode());
        assert_ne!(shifted, id);
    }

    #[test]
    fn tail_and_replaced() {
        let id: TaskIdentity = ["build", "process", "make"].into_iter().collect();
        assert_eq!(id.tail().fields(), ["process", "make"]);
        assert_eq!(id.replaced(1, "shell").fields(), ["build", "shell", "make"]);
    }
}

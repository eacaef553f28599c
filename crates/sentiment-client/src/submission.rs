/// What a block of user input turns into once blank lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Exactly one non-blank line: sent to `/predict`.
    Single(String),
    /// Two or more lines: sent to `/predict/batch`, in order.
    Batch(Vec<String>),
}

impl Submission {
    /// Split input on newlines, trim each line, and drop blank ones.
    ///
    /// Returns `None` when nothing is left to send.
    pub fn from_input(input: &str) -> Option<Self> {
        let mut lines: Vec<String> = input
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        match lines.len() {
            0 => None,
            1 => lines.pop().map(Self::Single),
            _ => Some(Self::Batch(lines)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_nothing() {
        assert_eq!(Submission::from_input(""), None);
        assert_eq!(Submission::from_input("  \n\t\n   "), None);
    }

    #[test]
    fn one_line_is_single() {
        assert_eq!(
            Submission::from_input("I love this product!"),
            Some(Submission::Single("I love this product!".into()))
        );
    }

    #[test]
    fn one_line_among_blanks_is_single_and_trimmed() {
        assert_eq!(
            Submission::from_input("\n\n   great film  \n\n"),
            Some(Submission::Single("great film".into()))
        );
    }

    #[test]
    fn several_lines_are_batch_in_order() {
        let sub = Submission::from_input(
            "I love this product!\n\nThis was the worst experience ever.\r\n meh \n",
        )
        .unwrap();
        assert_eq!(
            sub,
            Submission::Batch(vec![
                "I love this product!".into(),
                "This was the worst experience ever.".into(),
                "meh".into(),
            ])
        );
        assert_eq!(sub.len(), 3);
    }
}

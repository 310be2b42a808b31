/// A named current/max value pair on a character sheet.
///
/// The host stores both fields as free-form text; numeric interpretation is
/// up to whoever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub current: String,
    pub max: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            max: String::new(),
        }
    }

    /// The current value as a number, if it parses as one.
    pub fn current_number(&self) -> Option<f64> {
        self.current.trim().parse().ok()
    }
}

use crate::ids::PlayerId;

/// A connected player account.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
}

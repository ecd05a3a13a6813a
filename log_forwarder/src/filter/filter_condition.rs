#[derive(Debug, Copy, Clone)]
pub enum FilterCondition {
    Contains,
    NotContains,
}

/// Fragment of SQL currently being written; formatters use it to reject
/// values that cannot nest where they stand.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    InList,
    SetClause,
    ValuesRow,
    ColumnList,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub fragment: Fragment,
}

impl Context {
    pub fn new(fragment: Fragment) -> Self {
        Self { fragment }
    }

    /// Copy of the context switched to another fragment.
    pub fn with_fragment(self, fragment: Fragment) -> Self {
        Self { fragment, ..self }
    }
}

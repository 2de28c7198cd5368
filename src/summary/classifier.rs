//! Change classification rules
//!
//! Two independent rule tables map a [`ResourceChange`] onto a category:
//!
//! - [`classify`] yields the detailed [`ChangeCategory`] used for counts,
//!   grouped listings and summaries.
//! - [`classify_symbol`] yields the single [`DiffSymbol`] used by the compact
//!   diff listing.
//!
//! Neither table is derived from the other; tests cross-check them.

use serde::Serialize;

use crate::plan::{Action, OutputChange, ResourceChange};

/// Reason code Terraform attaches when an in-place update is impossible
pub const REPLACE_REASON: &str = "replace_because_cannot_update";

/// Detailed category of a resource change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChangeCategory {
    Create,
    Update,
    UpdateImport,
    Delete,
    Replace,
    ReplaceImport,
    ImportNoChange,
    RemoveForget,
    NoOp,
}

impl ChangeCategory {
    /// Every category, in declaration order
    pub const ALL: [ChangeCategory; 9] = [
        ChangeCategory::Create,
        ChangeCategory::Update,
        ChangeCategory::UpdateImport,
        ChangeCategory::Delete,
        ChangeCategory::Replace,
        ChangeCategory::ReplaceImport,
        ChangeCategory::ImportNoChange,
        ChangeCategory::RemoveForget,
        ChangeCategory::NoOp,
    ];

    /// Order of the grouped subsections in detail mode
    pub const DETAIL_ORDER: [ChangeCategory; 8] = [
        ChangeCategory::Create,
        ChangeCategory::Update,
        ChangeCategory::UpdateImport,
        ChangeCategory::Delete,
        ChangeCategory::ImportNoChange,
        ChangeCategory::RemoveForget,
        ChangeCategory::Replace,
        ChangeCategory::ReplaceImport,
    ];

    /// Get the label for this category
    pub fn label(&self) -> &'static str {
        match self {
            ChangeCategory::Create => "create",
            ChangeCategory::Update => "update",
            ChangeCategory::UpdateImport => "update-import",
            ChangeCategory::Delete => "delete",
            ChangeCategory::Replace => "replace",
            ChangeCategory::ReplaceImport => "replace-import",
            ChangeCategory::ImportNoChange => "import-no-change",
            ChangeCategory::RemoveForget => "remove-forget",
            ChangeCategory::NoOp => "no-op",
        }
    }

    /// Whether this category counts as a change to apply
    pub fn is_change(&self) -> bool {
        !matches!(self, ChangeCategory::NoOp)
    }
}

/// Category of an output change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OutputCategory {
    Create,
    Update,
    Delete,
    NoOp,
}

impl OutputCategory {
    pub const ALL: [OutputCategory; 4] = [
        OutputCategory::Create,
        OutputCategory::Update,
        OutputCategory::Delete,
        OutputCategory::NoOp,
    ];

    /// Output categories that count as changes, in listing order
    pub const CHANGES: [OutputCategory; 3] = [
        OutputCategory::Create,
        OutputCategory::Update,
        OutputCategory::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutputCategory::Create => "create",
            OutputCategory::Update => "update",
            OutputCategory::Delete => "delete",
            OutputCategory::NoOp => "no-op",
        }
    }
}

/// Symbol shown for a change in the compact diff listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiffSymbol {
    /// Replacement listed as delete, then create
    ReplaceDeleteCreate,
    /// Replacement listed as create, then delete (create_before_destroy)
    ReplaceCreateDelete,
    Create,
    Update,
    Delete,
    Forget,
    /// Import of an object that otherwise stays unchanged
    ImportNoChange,
    /// Not shown in the diff listing
    Suppressed,
}

impl DiffSymbol {
    /// Get the symbol text, or `None` when the change is not listed
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            DiffSymbol::ReplaceDeleteCreate => Some("-/+"),
            DiffSymbol::ReplaceCreateDelete => Some("+/-"),
            DiffSymbol::Create => Some("+"),
            DiffSymbol::Update => Some("~"),
            DiffSymbol::Delete => Some("-"),
            DiffSymbol::Forget => Some("."),
            DiffSymbol::ImportNoChange => Some("<="),
            DiffSymbol::Suppressed => None,
        }
    }
}

/// Classify a resource change into its detailed category.
///
/// Rules are evaluated in order and the first match wins. `None` means the
/// change matched no rule (for example a create/delete pair without the
/// replacement reason code); such changes are counted but never listed.
pub fn classify(change: &ResourceChange) -> Option<ChangeCategory> {
    let is_replace = change.has_action(Action::Create)
        && change.has_action(Action::Delete)
        && change.action_reason.as_deref() == Some(REPLACE_REASON);

    if change.actions_are(&[Action::Create]) {
        Some(ChangeCategory::Create)
    } else if change.actions_are(&[Action::Update]) && !change.importing {
        Some(ChangeCategory::Update)
    } else if change.actions_are(&[Action::Update]) {
        Some(ChangeCategory::UpdateImport)
    } else if change.actions_are(&[Action::Delete]) {
        Some(ChangeCategory::Delete)
    } else if is_replace && !change.importing {
        Some(ChangeCategory::Replace)
    } else if is_replace {
        Some(ChangeCategory::ReplaceImport)
    } else if change.actions_are(&[Action::NoOp]) && change.importing {
        Some(ChangeCategory::ImportNoChange)
    } else if change.actions_are(&[Action::Forget]) {
        Some(ChangeCategory::RemoveForget)
    } else if change.actions_are(&[Action::NoOp]) {
        Some(ChangeCategory::NoOp)
    } else {
        None
    }
}

/// Classify a resource change for the compact diff listing.
///
/// A create/delete pair is the one case where list order matters: Terraform
/// lists `["delete", "create"]` for a standard replacement and
/// `["create", "delete"]` for create_before_destroy.
pub fn classify_symbol(change: &ResourceChange) -> DiffSymbol {
    if let (Some(create), Some(delete)) = (
        change.position_of(Action::Create),
        change.position_of(Action::Delete),
    ) {
        if delete < create {
            DiffSymbol::ReplaceDeleteCreate
        } else {
            DiffSymbol::ReplaceCreateDelete
        }
    } else if change.has_action(Action::Create) {
        DiffSymbol::Create
    } else if change.has_action(Action::Update) {
        DiffSymbol::Update
    } else if change.has_action(Action::Delete) {
        DiffSymbol::Delete
    } else if change.has_action(Action::Forget) {
        DiffSymbol::Forget
    } else if change.actions_are(&[Action::NoOp]) && change.importing {
        DiffSymbol::ImportNoChange
    } else {
        DiffSymbol::Suppressed
    }
}

/// Classify an output change. Anything that is not a single create, update
/// or delete counts as no-op.
pub fn classify_output(change: &OutputChange) -> OutputCategory {
    if change.actions_are(&[Action::Create]) {
        OutputCategory::Create
    } else if change.actions_are(&[Action::Update]) {
        OutputCategory::Update
    } else if change.actions_are(&[Action::Delete]) {
        OutputCategory::Delete
    } else {
        OutputCategory::NoOp
    }
}

/// Classify an output change for the compact diff listing
pub fn classify_output_symbol(change: &OutputChange) -> DiffSymbol {
    if change.actions.contains(&Action::Create) {
        DiffSymbol::Create
    } else if change.actions.contains(&Action::Update) {
        DiffSymbol::Update
    } else if change.actions.contains(&Action::Delete) {
        DiffSymbol::Delete
    } else {
        DiffSymbol::Suppressed
    }
}

//! Link activity decision for the view layer.
//!
//! # Rules
//! - Empty target name: never active
//! - No current route: nothing is active
//! - Target definition has `is_active`: its answer is final
//! - Otherwise: same name and equal params

use crate::navigation::request::{NavigationRequest, ResolvedRoute};
use crate::routing::table::RouteTable;

/// Whether a link to `target` should render as active for `current`.
///
/// With no current route the answer is `false` before any custom predicate
/// is looked up, so an `is_active` predicate never runs until the first
/// navigation has committed.
pub fn is_active(
    table: &RouteTable,
    current: Option<&ResolvedRoute>,
    target: &NavigationRequest,
) -> bool {
    if target.name.is_empty() {
        return false;
    }
    let Some(current) = current else {
        return false;
    };

    if let Some(predicate) = table
        .get(&target.name)
        .and_then(|definition| definition.is_active_predicate().cloned())
    {
        return predicate(current);
    }

    target.name == current.name && target.params == current.params
}

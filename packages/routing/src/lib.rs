//! Pure-logic request planning for the warbler API client.
//!
//! This crate has **no I/O**: no networking, no filesystem, no clock. It
//! turns an action keyword plus loosely-typed caller input into a
//! [`RequestPlan`] (method, path, parameters), and reports every pre-flight
//! failure as a [`RoutingError`] before a transport is ever involved.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`action`] | [`Action`] keywords, HTTP [`Method`]s, API [`Resource`]s |
//! | [`reference`] | Identifier resolution: id / name / entity → [`Reference`] |
//! | [`table`] | Per-resource [`RoutingTable`]s |
//! | [`plan`] | `plan_*` functions producing [`RequestPlan`]s |

pub mod action;
pub mod error;
pub mod plan;
pub mod reference;
pub mod table;

pub use action::{Action, Method, Resource};
pub use error::RoutingError;
pub use plan::{
    plan_account, plan_block, plan_favorites, plan_friendship, plan_message, plan_messages,
    plan_status, plan_timeline, plan_trends, plan_user, IntoMessageValue, IntoStatusValue,
    MessageValue, Params, RequestPlan, StatusValue,
};
pub use reference::{IntoReference, Reference};
pub use table::{table, Route, RoutingTable};

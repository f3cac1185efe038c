//! Controlled multi-value selection for tuidom terminal UIs.
//!
//! A [`MultiSelect`] renders a trigger with one badge per selected value and,
//! while open, a popover with a searchable list of [`Item`]s. It never owns
//! the selection: the parent passes the current values on every build and
//! applies whatever arrives through `on_values_change`.
//!
//! ```text
//! MultiSelect
//! ├── Trigger ── Badge (× remove) ... [ClearControl]
//! └── Popover (open only)
//!     └── Content ── ListSurface ── search, Item, Item, ...
//! ```
//!
//! Parts that need the selection read it from a [`RenderScope`] created by
//! the container. Building one of them outside a container is an error.
//!
//! Events go through a [`Dispatcher`], which runs handlers from the target
//! element outward and stops at the first [`EventResult::Consumed`].

mod candidate;
mod clear;
mod container;
mod context;
mod dispatch;
mod error;
mod filter;
mod handler;
mod item;
mod list;
mod popover;
pub mod selection;
mod state;
mod theme;
mod trigger;

pub use candidate::Candidate;
pub use clear::ClearControl;
pub use container::{MultiSelect, MultiSelectState};
pub use context::{ChangeCallback, RenderScope, SelectionContext};
pub use dispatch::Dispatcher;
pub use error::MultiSelectError;
pub use filter::{FilterMatch, substring_filter};
pub use handler::{
    EventData, EventResult, Handler, HandlerContext, HandlerRegistry, events,
};
pub use item::Item;
pub use list::{Content, ListSurface};
pub use popover::Popover;
pub use state::State;
pub use theme::Palette;
pub use trigger::{Badge, Trigger};

pub mod prelude {
    pub use crate::{
        Candidate, ClearControl, Content, Dispatcher, EventResult, HandlerRegistry, Item,
        ListSurface, MultiSelect, MultiSelectError, MultiSelectState, State, Trigger,
    };
}

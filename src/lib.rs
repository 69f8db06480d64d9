//! Queue Minder - a grouped, collapsible view over a flat play queue.
//!
//! Consecutive queue entries from the same album fold into one row. The
//! view supports text filtering, now-playing tracking, expand/collapse and
//! translation of drag-and-drop gestures back onto the flat queue.
//!
//! Data flows one way through the crate:
//!
//! - [`queue`]: snapshots of the playback service's queue
//! - [`grouping`]: album runs
//! - [`view`]: collapse decision, filter, now-playing rows
//! - [`index`]: view index ⇄ flat position arithmetic
//! - [`reorder`] / [`selection`]: commands for the playback service
//!
//! [`engine::QueueViewEngine`] ties these together for a UI, and
//! [`controller::QueueController`] drives it from an async
//! [`queue::QueueService`].

pub mod cli;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod index;
pub mod model;
pub mod queue;
pub mod reorder;
pub mod selection;
#[cfg(test)]
pub mod test_utils;
pub mod view;

//! Outbound seams of a session: what it tells the presentation layer

use crate::game::{Cell, Segment};

/// Receives board changes after every mutation.
///
/// Segments arrive tail first, each with a stable id, so an implementation can
/// keep its own id-to-sprite map and only touch what changed.
pub trait RenderSink {
    fn segments_changed(&mut self, segments: &[Segment]);

    fn food_placed(&mut self, cell: Cell);

    fn food_removed(&mut self);
}

/// Moments worth a spoken (or otherwise audible) reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    Born,
    Ate,
    Died,
}

impl Announcement {
    pub fn phrase(&self) -> &'static str {
        match self {
            Announcement::Born => "I'm alive!",
            Announcement::Ate => "Yum",
            Announcement::Died => "I died...",
        }
    }
}

/// Fire-and-forget feedback; must not block and cannot fail the caller
pub trait Announcer {
    fn announce(&self, event: Announcement);
}

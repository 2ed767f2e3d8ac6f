//! World-to-screen transform and per-body screen trails.
//!
//! Pipeline: relative to the tracked body, rotate or project, scale by
//! `scale_factor * zoom_level`, add the pan offset. The `z` of a screen
//! position is the depth key; larger is nearer the viewer.

use std::collections::VecDeque;

use bevy::math::DVec3;

use crate::body::Body;
use crate::camera::ViewSettings;
use crate::types::BodyId;

/// Map one world position to screen space.
pub fn world_to_screen(position: DVec3, origin: DVec3, settings: &ViewSettings, scale_factor: f64) -> DVec3 {
    let relative = position - origin;
    let rotated = settings.rotation.apply(relative);
    let scaled = rotated * (scale_factor * settings.zoom_level);
    scaled + settings.pan_offset.extend(0.0)
}

/// Screen-space state of one body.
#[derive(Clone, Debug)]
pub struct BodyView {
    body: BodyId,
    /// Screen positions, oldest first; `z` holds the depth key.
    screen_trail: VecDeque<DVec3>,
    capacity: usize,
    /// Settings used for the previous update.
    previous: Option<ViewSettings>,
    /// `Trail::pushed` of the world history at the previous update.
    synced: Option<u64>,
}

impl BodyView {
    pub fn new(body: BodyId, capacity: usize) -> Self {
        Self {
            body,
            screen_trail: VecDeque::new(),
            capacity: capacity.max(1),
            previous: None,
            synced: None,
        }
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Current screen position, if the body has been placed yet.
    pub fn screen_position(&self) -> Option<DVec3> {
        self.screen_trail.back().copied()
    }

    /// Screen positions from oldest to newest.
    pub fn screen_trail(&self) -> impl ExactSizeIterator<Item = &DVec3> + DoubleEndedIterator {
        self.screen_trail.iter()
    }

    /// Most screen positions kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn trail_len(&self) -> usize {
        self.screen_trail.len()
    }

    /// Bring the screen trail up to date with `body`'s world history.
    ///
    /// The whole trail is rebuilt only when the tail is shown and the
    /// transform changed since the last call; otherwise only the newest
    /// world position is transformed and appended. If no position was
    /// recorded since the last call the newest screen point is replaced.
    pub fn update_screen_position(&mut self, body: &Body, tracked: &Body, settings: &ViewSettings, scale_factor: f64) {
        let rebuild = settings.show_tail
            && self
                .previous
                .as_ref()
                .is_none_or(|previous| settings.transform_changed(previous));

        if rebuild {
            self.screen_trail.clear();
            // Histories are recorded together each frame, so align from the newest end.
            let count = body.trail.len().min(tracked.trail.len()).min(self.capacity);
            let mine = body.trail.iter().skip(body.trail.len() - count);
            let theirs = tracked.trail.iter().skip(tracked.trail.len() - count);
            for (position, origin) in mine.zip(theirs) {
                self.push(world_to_screen(*position, *origin, settings, scale_factor));
            }
        } else if let (Some(position), Some(origin)) = (body.trail.latest(), tracked.trail.latest()) {
            if self.synced == Some(body.trail.pushed()) {
                self.screen_trail.pop_back();
            }
            self.push(world_to_screen(position, origin, settings, scale_factor));
        }

        self.previous = Some(settings.clone());
        self.synced = Some(body.trail.pushed());
    }

    fn push(&mut self, point: DVec3) {
        if self.screen_trail.len() == self.capacity {
            self.screen_trail.pop_front();
        }
        self.screen_trail.push_back(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::InitialState;
    use crate::types::BodyKind;
    use bevy::math::DVec2;

    fn body_at(id: usize, position: DVec3) -> Body {
        Body::new(
            BodyId(id),
            format!("body {id}"),
            BodyKind::Moon,
            InitialState::cartesian(position, DVec3::ZERO),
            1.0,
            1.0,
            100,
        )
    }

    fn settings(tracked: BodyId) -> ViewSettings {
        ViewSettings::new(tracked, DVec2::new(400.0, 300.0))
    }

    #[test]
    fn test_tracked_body_sits_at_pan_origin() {
        let tracked = body_at(0, DVec3::new(5.0, 5.0, 5.0));
        let mut view = BodyView::new(tracked.id, 10);
        view.update_screen_position(&tracked, &tracked, &settings(tracked.id), 1.0);
        assert_eq!(view.screen_position(), Some(DVec3::new(400.0, 300.0, 0.0)));
    }

    #[test]
    fn test_world_to_screen_scales_and_pans() {
        let mut s = settings(BodyId(0));
        s.zoom_level = 2.0;
        let p = world_to_screen(DVec3::new(10.0, -4.0, 3.0), DVec3::new(0.0, -4.0, 0.0), &s, 0.5);
        assert_eq!(p, DVec3::new(410.0, 300.0, 3.0));
    }

    #[test]
    fn test_steady_state_appends_one_point() {
        let origin = body_at(0, DVec3::ZERO);
        let mut body = body_at(1, DVec3::new(1.0, 0.0, 0.0));
        let mut s = settings(origin.id);
        s.show_tail = true;
        let mut view = BodyView::new(body.id, 100);

        view.update_screen_position(&body, &origin, &s, 1.0);
        let before: Vec<DVec3> = view.screen_trail().copied().collect();

        body.position = DVec3::new(2.0, 0.0, 0.0);
        body.record_position();
        let mut origin_moved = origin.clone();
        origin_moved.record_position();
        view.update_screen_position(&body, &origin_moved, &s, 1.0);

        let after: Vec<DVec3> = view.screen_trail().copied().collect();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last(), Some(&DVec3::new(402.0, 300.0, 0.0)));
    }

    #[test]
    fn test_changed_zoom_rebuilds_trail() {
        let origin = {
            let mut b = body_at(0, DVec3::ZERO);
            b.record_position();
            b.record_position();
            b
        };
        let mut body = body_at(1, DVec3::new(1.0, 0.0, 0.0));
        body.position = DVec3::new(2.0, 0.0, 0.0);
        body.record_position();
        body.position = DVec3::new(3.0, 0.0, 0.0);
        body.record_position();

        let mut s = settings(origin.id);
        s.show_tail = true;
        let mut view = BodyView::new(body.id, 100);
        view.update_screen_position(&body, &origin, &s, 1.0);
        assert_eq!(view.trail_len(), 3);

        s.zoom_level = 10.0;
        view.update_screen_position(&body, &origin, &s, 1.0);
        let xs: Vec<f64> = view.screen_trail().map(|p| p.x).collect();
        assert_eq!(xs, vec![410.0, 420.0, 430.0]);
    }

    #[test]
    fn test_hidden_tail_only_appends() {
        let mut origin = body_at(0, DVec3::ZERO);
        let mut body = body_at(1, DVec3::new(1.0, 0.0, 0.0));
        let mut s = settings(origin.id);
        let mut view = BodyView::new(body.id, 100);
        view.update_screen_position(&body, &origin, &s, 1.0);
        s.zoom_level = 3.0;
        origin.record_position();
        body.record_position();
        view.update_screen_position(&body, &origin, &s, 1.0);
        assert_eq!(view.trail_len(), 2);
        assert_eq!(view.screen_position().map(|p| p.x), Some(403.0));
    }

    #[test]
    fn test_unrecorded_update_replaces_newest_point() {
        let origin = body_at(0, DVec3::ZERO);
        let body = body_at(1, DVec3::X);
        let mut s = settings(origin.id);
        let mut view = BodyView::new(body.id, 100);
        view.update_screen_position(&body, &origin, &s, 1.0);
        view.update_screen_position(&body, &origin, &s, 1.0);
        assert_eq!(view.trail_len(), 1);

        s.pan_offset = DVec2::new(0.0, 0.0);
        view.update_screen_position(&body, &origin, &s, 1.0);
        assert_eq!(view.trail_len(), 1);
        assert_eq!(view.screen_position(), Some(DVec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_screen_trail_is_bounded() {
        let origin = body_at(0, DVec3::ZERO);
        let mut body = body_at(1, DVec3::X);
        let s = settings(origin.id);
        let mut view = BodyView::new(body.id, 4);
        for _ in 0..10 {
            body.record_position();
            view.update_screen_position(&body, &origin, &s, 1.0);
        }
        assert_eq!(view.trail_len(), 4);
    }
}

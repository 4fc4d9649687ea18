use ferry_types::{Vec3d, Vec3f};
use std::collections::VecDeque;
use tracing::warn;

/// Confirm id used for teleports the proxy makes up itself; there is nothing
/// to acknowledge to the Java server for these.
pub const SYNTHETIC_TELEPORT_ID: i32 = -1;

const ERROR_X_AND_Z: f64 = 0.1;
const ERROR_Y: f64 = 0.1;

/// A teleport sent to the Bedrock client that it has not yet acknowledged by
/// moving to the target position.
#[derive(Debug, Clone, PartialEq)]
pub struct TeleportCache {
    /// Feet position the Java server asked for; `None` for synthetic teleports.
    pub authoritative_position: Option<Vec3d>,
    /// Eye-level position sent to the Bedrock client.
    pub reported_position: Vec3f,
    pub pitch: f32,
    pub yaw: f32,
    pub confirm_id: i32,
}

impl TeleportCache {
    pub fn new(
        authoritative_position: Vec3d,
        reported_position: Vec3f,
        pitch: f32,
        yaw: f32,
        confirm_id: i32,
    ) -> Self {
        Self {
            authoritative_position: Some(authoritative_position),
            reported_position,
            pitch,
            yaw,
            confirm_id,
        }
    }

    pub fn synthetic(reported_position: Vec3f, pitch: f32, yaw: f32) -> Self {
        Self {
            authoritative_position: None,
            reported_position,
            pitch,
            yaw,
            confirm_id: SYNTHETIC_TELEPORT_ID,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.confirm_id == SYNTHETIC_TELEPORT_ID
    }

    /// Whether a reported position is close enough to count as the client
    /// having arrived. Every axis must be strictly within tolerance.
    pub fn can_confirm(&self, position: Vec3f) -> bool {
        let x_diff = (self.reported_position.x - position.x).abs() as f64;
        let y_diff = (self.reported_position.y - position.y).abs() as f64;
        let z_diff = (self.reported_position.z - position.z).abs() as f64;
        x_diff < ERROR_X_AND_Z && y_diff < ERROR_Y && z_diff < ERROR_X_AND_Z
    }
}

/// Outcome of matching a movement report against the pending teleports.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Nothing pending.
    Idle,
    /// The newest teleport was reached. `superseded` older entries were
    /// dropped along with it.
    Confirmed {
        cache: TeleportCache,
        superseded: usize,
    },
    /// Still waiting. `resend` is set when the client has ignored the active
    /// teleport for long enough that it should be sent again.
    Pending { resend: Option<TeleportCache> },
}

/// Pending teleports in arrival order. Only the newest entry is matched
/// against movement; older ones were overridden by it.
#[derive(Debug, Clone)]
pub struct TeleportQueue {
    pending: VecDeque<TeleportCache>,
    max_pending: usize,
    resend_after: u32,
    unmatched_reports: u32,
}

impl TeleportQueue {
    pub fn new(max_pending: usize, resend_after: u32) -> Self {
        Self {
            pending: VecDeque::new(),
            max_pending: max_pending.max(1),
            resend_after,
            unmatched_reports: 0,
        }
    }

    pub fn push(&mut self, cache: TeleportCache) {
        if self.pending.len() >= self.max_pending {
            if let Some(dropped) = self.pending.pop_front() {
                warn!(
                    "Too many unconfirmed teleports, dropping teleport {}",
                    dropped.confirm_id
                );
            }
        }
        self.pending.push_back(cache);
        self.unmatched_reports = 0;
    }

    /// The teleport the client is expected to be moving towards.
    pub fn active(&self) -> Option<&TeleportCache> {
        self.pending.back()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn reconcile(&mut self, position: Vec3f) -> Reconciliation {
        let Some(active) = self.pending.back() else {
            return Reconciliation::Idle;
        };

        if active.can_confirm(position) {
            let superseded = self.pending.len() - 1;
            let cache = self.pending.pop_back();
            self.pending.clear();
            self.unmatched_reports = 0;
            return match cache {
                Some(cache) => Reconciliation::Confirmed { cache, superseded },
                None => Reconciliation::Idle,
            };
        }

        self.unmatched_reports += 1;
        if self.resend_after > 0 && self.unmatched_reports >= self.resend_after {
            self.unmatched_reports = 0;
            return Reconciliation::Pending {
                resend: Some(active.clone()),
            };
        }
        Reconciliation::Pending { resend: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_at(x: f32, y: f32, z: f32, id: i32) -> TeleportCache {
        TeleportCache::new(
            Vec3d::new(x as f64, y as f64 - 1.62, z as f64),
            Vec3f::new(x, y, z),
            0.0,
            0.0,
            id,
        )
    }

    #[test]
    fn confirm_requires_strict_tolerance_on_every_axis() {
        let cache = cache_at(0.0, 0.0, 0.0, 1);
        assert!(cache.can_confirm(Vec3f::new(0.09, -0.09, 0.05)));
        assert!(!cache.can_confirm(Vec3f::new(0.1, 0.0, 0.0)));
        assert!(!cache.can_confirm(Vec3f::new(0.0, 0.1, 0.0)));
        assert!(!cache.can_confirm(Vec3f::new(0.0, 0.0, -0.1)));
        assert!(!cache.can_confirm(Vec3f::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn synthetic_teleports_use_sentinel_id() {
        let cache = TeleportCache::synthetic(Vec3f::ZERO, 10.0, 20.0);
        assert!(cache.is_synthetic());
        assert_eq!(cache.confirm_id, SYNTHETIC_TELEPORT_ID);
        assert_eq!(cache.authoritative_position, None);
    }

    #[test]
    fn only_the_newest_teleport_confirms() {
        let mut queue = TeleportQueue::new(16, 0);
        queue.push(cache_at(0.0, 0.0, 0.0, 1));
        queue.push(cache_at(100.0, 70.0, 100.0, 2));

        // Arriving at the superseded target is ordinary movement.
        assert_eq!(
            queue.reconcile(Vec3f::ZERO),
            Reconciliation::Pending { resend: None }
        );
        assert_eq!(queue.len(), 2);

        let Reconciliation::Confirmed { cache, superseded } =
            queue.reconcile(Vec3f::new(100.0, 70.05, 100.0))
        else {
            panic!("expected confirmation");
        };
        assert_eq!(cache.confirm_id, 2);
        assert_eq!(superseded, 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_queue_is_idle() {
        let mut queue = TeleportQueue::new(16, 20);
        assert_eq!(queue.reconcile(Vec3f::ZERO), Reconciliation::Idle);
    }

    #[test]
    fn queue_is_bounded_oldest_first() {
        let mut queue = TeleportQueue::new(2, 0);
        queue.push(cache_at(1.0, 0.0, 0.0, 1));
        queue.push(cache_at(2.0, 0.0, 0.0, 2));
        queue.push(cache_at(3.0, 0.0, 0.0, 3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.active().map(|c| c.confirm_id), Some(3));
    }

    #[test]
    fn ignored_teleport_is_resent() {
        let mut queue = TeleportQueue::new(16, 3);
        queue.push(cache_at(50.0, 50.0, 50.0, 9));
        assert_eq!(
            queue.reconcile(Vec3f::ZERO),
            Reconciliation::Pending { resend: None }
        );
        assert_eq!(
            queue.reconcile(Vec3f::ZERO),
            Reconciliation::Pending { resend: None }
        );
        let Reconciliation::Pending { resend: Some(cache) } = queue.reconcile(Vec3f::ZERO) else {
            panic!("expected a resend");
        };
        assert_eq!(cache.confirm_id, 9);
        assert_eq!(
            queue.reconcile(Vec3f::ZERO),
            Reconciliation::Pending { resend: None }
        );
    }
}

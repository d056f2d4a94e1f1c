//! Transient user-facing notices with a dismissal deadline.
//!
//! A notice is a deferred dismissal: it is posted with a time-to-live and
//! disappears once the caller-supplied clock passes its deadline, unless it is
//! cancelled first. Nothing here sleeps or spawns; callers poll with `now`.

use chrono::{Duration, NaiveDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    /// Offers to restore the expense that was just deleted.
    Undo { expense_id: Uuid },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl Notice {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now >= self.expires_at
    }

    /// Time left before dismissal, never negative.
    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    pub fn is_undo(&self) -> bool {
        matches!(self.kind, NoticeKind::Undo { .. })
    }
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: NaiveDateTime,
        ttl: Duration,
    ) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
            posted_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(NaiveDateTime::MAX),
        });
        id
    }

    /// Dismisses a notice before its deadline. Returns it if it was still pending.
    pub fn cancel(&mut self, id: NoticeId) -> Option<Notice> {
        let idx = self.notices.iter().position(|notice| notice.id == id)?;
        Some(self.notices.remove(idx))
    }

    /// Dismisses every pending undo offer.
    pub fn cancel_undo(&mut self) -> Vec<Notice> {
        let (undo, rest): (Vec<_>, Vec<_>) = self.notices.drain(..).partition(Notice::is_undo);
        self.notices = rest;
        undo
    }

    /// Removes and returns notices whose deadline has passed.
    pub fn expire(&mut self, now: NaiveDateTime) -> Vec<Notice> {
        let (expired, live): (Vec<_>, Vec<_>) = self
            .notices
            .drain(..)
            .partition(|notice| notice.is_expired(now));
        self.notices = live;
        expired
    }

    pub fn active(&self, now: NaiveDateTime) -> impl Iterator<Item = &Notice> + '_ {
        self.notices
            .iter()
            .filter(move |notice| !notice.is_expired(now))
    }

    pub fn pending_undo(&self, now: NaiveDateTime) -> Option<&Notice> {
        self.active(now).filter(|notice| notice.is_undo()).last()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(seconds: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + Duration::seconds(seconds)
    }

    #[test]
    fn notice_expires_exactly_at_deadline() {
        let mut board = NoticeBoard::new();
        board.post(NoticeKind::Success, "saved", at(0), Duration::milliseconds(2_500));

        assert_eq!(board.active(at(2)).count(), 1);
        assert!(board.expire(at(2)).is_empty());

        let deadline = at(0) + Duration::milliseconds(2_500);
        assert_eq!(board.active(deadline).count(), 0);
        let expired = board.expire(deadline);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].message, "saved");
        assert!(board.is_empty());
    }

    #[test]
    fn cancel_removes_pending_notice_once() {
        let mut board = NoticeBoard::new();
        let id = board.post(NoticeKind::Success, "saved", at(0), Duration::seconds(5));
        assert!(board.cancel(id).is_some());
        assert!(board.cancel(id).is_none());
        assert!(board.expire(at(10)).is_empty());
    }

    #[test]
    fn cancel_undo_leaves_other_notices() {
        let mut board = NoticeBoard::new();
        board.post(NoticeKind::Success, "added", at(0), Duration::seconds(5));
        board.post(
            NoticeKind::Undo { expense_id: Uuid::new_v4() },
            "deleted",
            at(0),
            Duration::seconds(5),
        );
        assert!(board.pending_undo(at(1)).is_some());

        let cancelled = board.cancel_undo();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(board.len(), 1);
        assert!(board.pending_undo(at(1)).is_none());
    }

    #[test]
    fn deadline_past_calendar_end_saturates() {
        let mut board = NoticeBoard::new();
        let late = NaiveDateTime::MAX - Duration::seconds(1);
        board.post(NoticeKind::Success, "late", late, Duration::hours(1));

        let notice = board.active(late).next().expect("notice is live when posted");
        assert_eq!(notice.expires_at, NaiveDateTime::MAX);
        assert_eq!(notice.remaining(late), Duration::seconds(1));
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut board = NoticeBoard::new();
        let id = board.post(NoticeKind::Success, "x", at(0), Duration::seconds(3));
        let notice = board.cancel(id).unwrap();
        assert_eq!(notice.remaining(at(1)), Duration::seconds(2));
        assert_eq!(notice.remaining(at(9)), Duration::zero());
    }
}

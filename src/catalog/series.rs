//! Series episode ordering.
//!
//! Editorial order wins: an episode with a non-zero `series_order` always
//! sorts before an unordered one, regardless of publication date. Unordered
//! episodes follow in publication order.

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::HashSet;

/// The fields ordering needs from a series member.
pub trait EpisodeSource {
    fn episode_id(&self) -> &str;
    fn series_order(&self) -> i32;
    fn published_at(&self) -> Option<NaiveDateTime>;
    fn reading_minutes(&self) -> i32;
}

impl EpisodeSource for crate::entities::blog_posts::Model {
    fn episode_id(&self) -> &str {
        &self.id
    }

    fn series_order(&self) -> i32 {
        self.series_order
    }

    fn published_at(&self) -> Option<NaiveDateTime> {
        self.published_at
    }

    fn reading_minutes(&self) -> i32 {
        self.reading_time
    }
}

/// Strict total order over episodes.
pub fn compare_episodes<E: EpisodeSource>(a: &E, b: &E) -> Ordering {
    match (a.series_order(), b.series_order()) {
        (0, 0) => {
            let by_date = match (a.published_at(), b.published_at()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_date.then_with(|| a.episode_id().cmp(b.episode_id()))
        }
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (x, y) => x
            .cmp(&y)
            .then_with(|| a.episode_id().cmp(b.episode_id())),
    }
}

/// Which episodes count as completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Exactly the ids the viewer reports as read.
    Viewer(HashSet<String>),
    /// Nothing is completed.
    #[default]
    None,
}

impl CompletionPolicy {
    /// Parses a comma-separated id list; a blank list means no policy.
    #[must_use]
    pub fn from_viewer_list(raw: Option<&str>) -> Self {
        let ids: HashSet<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
        if ids.is_empty() {
            Self::None
        } else {
            Self::Viewer(ids)
        }
    }

    fn is_completed(&self, id: &str) -> bool {
        match self {
            Self::Viewer(ids) => ids.contains(id),
            Self::None => false,
        }
    }
}

/// One ordered member of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode<'a, E> {
    pub item: &'a E,
    /// Stored order when non-zero, otherwise the 1-based position.
    pub display_order: i32,
    pub is_current: bool,
    pub is_completed: bool,
}

/// An ordered series with its derived aggregates.
#[derive(Debug, Clone)]
pub struct SeriesOutline<'a, E> {
    pub episodes: Vec<Episode<'a, E>>,
    pub total_minutes: i64,
    pub completed_count: usize,
}

impl<E> SeriesOutline<'_, E> {
    #[must_use]
    pub fn total_duration(&self) -> String {
        format_duration(self.total_minutes)
    }
}

/// Orders the members of a series and flags current and completed episodes.
pub fn outline<'a, E: EpisodeSource>(
    members: &'a [E],
    current: Option<&str>,
    policy: &CompletionPolicy,
) -> SeriesOutline<'a, E> {
    let mut ordered: Vec<&E> = members.iter().collect();
    ordered.sort_by(|a, b| compare_episodes(*a, *b));

    let episodes: Vec<Episode<'a, E>> = ordered
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let id = item.episode_id();
            Episode {
                item,
                display_order: display_order(item.series_order(), index),
                is_current: current.is_some_and(|c| c.eq_ignore_ascii_case(id)),
                is_completed: policy.is_completed(&id.to_ascii_lowercase()),
            }
        })
        .collect();

    let total_minutes = members
        .iter()
        .map(|m| i64::from(m.reading_minutes().max(0)))
        .sum();
    let completed_count = episodes.iter().filter(|e| e.is_completed).count();

    SeriesOutline {
        episodes,
        total_minutes,
        completed_count,
    }
}

/// 1-based position of an item inside its series, by effective order.
pub fn position_of<E: EpisodeSource>(members: &[E], item_id: &str) -> Option<i32> {
    let mut ordered: Vec<&E> = members.iter().collect();
    ordered.sort_by(|a, b| compare_episodes(*a, *b));
    ordered
        .iter()
        .position(|m| m.episode_id() == item_id)
        .map(|index| display_order(ordered[index].series_order(), index))
}

fn display_order(stored: i32, index: usize) -> i32 {
    if stored != 0 {
        stored
    } else {
        i32::try_from(index + 1).unwrap_or(i32::MAX)
    }
}

/// Formats minutes as `"Xh Ym"`, dropping the hour part when it is zero.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours == 0 {
        format!("{rest}m")
    } else {
        format!("{hours}h {rest}m")
    }
}

//! Gainer/loser ranking
//!
//! Sorts a snapshot list by one percentage-change window and slices off the
//! best and worst performers. Sorting is stable, so fetch order (descending
//! market cap) breaks ties. Assets with no value for the window sort below
//! every asset that has one.

use crate::market::{AssetSnapshot, ChangeWindow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// Default number of gainers and losers per window
pub const DEFAULT_LIMIT: usize = 20;

/// Best and worst performers for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movers {
    /// Window the assets were ranked on
    pub window: ChangeWindow,
    /// Top performers, best first
    pub gainers: Vec<AssetSnapshot>,
    /// Bottom performers, worst first
    pub losers: Vec<AssetSnapshot>,
}

/// Movers for every window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    pub hourly: Movers,
    pub daily: Movers,
    pub weekly: Movers,
}

impl Rankings {
    /// Iterate windows shortest first
    pub fn iter(&self) -> impl Iterator<Item = &Movers> {
        [&self.hourly, &self.daily, &self.weekly].into_iter()
    }
}

/// Descending by change, absent values last
fn by_change_desc(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    // Option orders None below Some, so reversing puts absent values last.
    b.cmp(&a)
}

/// Rank assets on one window, keeping at most `limit` gainers and losers
///
/// With fewer than `2 * limit` assets the two lists overlap.
pub fn rank(assets: &[AssetSnapshot], window: ChangeWindow, limit: usize) -> Movers {
    let mut sorted: Vec<&AssetSnapshot> = assets.iter().collect();
    sorted.sort_by(|a, b| by_change_desc(a.change(window), b.change(window)));

    let gainers = sorted.iter().take(limit).map(|a| (*a).clone()).collect();
    let losers = sorted.iter().rev().take(limit).map(|a| (*a).clone()).collect();

    Movers {
        window,
        gainers,
        losers,
    }
}

/// Rank assets on the 1h, 24h and 7d windows
pub fn rank_all(assets: &[AssetSnapshot], limit: usize) -> Rankings {
    Rankings {
        hourly: rank(assets, ChangeWindow::Hour, limit),
        daily: rank(assets, ChangeWindow::Day, limit),
        weekly: rank(assets, ChangeWindow::Week, limit),
    }
}

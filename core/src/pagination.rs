//! Lazy walk over the paginated stock listing.
//!
//! Pages are requested strictly one after another, and only once the items
//! of the previous page have been consumed. The walk ends when the number of
//! items received reaches the listing total.
//!
//! The server reports the total on every page and nothing stops it from
//! changing between requests. [`TotalPolicy`] decides which report counts:
//! the first one (default) or the most recent one. Either way a drift is
//! logged, since both choices can then stop short or run long.

use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::client::MarketplaceClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::ProductInfoStock;

/// Which reported total ends a listing walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotalPolicy {
    /// Freeze the total reported with page 1.
    #[default]
    FirstPage,
    /// Re-read the total from every page.
    LatestPage,
}

/// Iterator over every `ProductInfoStock` of the listing, starting at page 1.
///
/// Created by [`MarketplaceClient::product_stocks`]. After yielding an error
/// it yields `None` forever; start a new walk to retry.
pub struct ProductStocks<'c, T> {
    client: &'c MarketplaceClient<T>,
    policy: TotalPolicy,
    next_page: u32,
    buffered: std::vec::IntoIter<ProductInfoStock>,
    collected: usize,
    total: Option<usize>,
    done: bool,
}

impl<'c, T: Transport> ProductStocks<'c, T> {
    pub(crate) fn new(client: &'c MarketplaceClient<T>, policy: TotalPolicy) -> Self {
        Self {
            client,
            policy,
            next_page: 1,
            buffered: Vec::new().into_iter(),
            collected: 0,
            total: None,
            done: false,
        }
    }

    /// Total currently used to decide termination, once page 1 has arrived.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    fn track_total(&mut self, reported: usize) -> usize {
        let tracked = match self.total {
            None => reported,
            Some(previous) => {
                if previous != reported {
                    warn!(
                        previous,
                        reported,
                        page = self.next_page,
                        policy = ?self.policy,
                        "listing total changed between pages"
                    );
                }
                match self.policy {
                    TotalPolicy::FirstPage => previous,
                    TotalPolicy::LatestPage => reported,
                }
            }
        };
        self.total = Some(tracked);
        tracked
    }
}

impl<T: Transport> Iterator for ProductStocks<'_, T> {
    type Item = Result<ProductInfoStock, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                self.collected += 1;
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }
            if self.total.is_some_and(|total| self.collected >= total) {
                self.done = true;
                return None;
            }

            let page = match self.client.fetch_product_stocks_page(self.next_page) {
                Ok(page) => page,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            let reported = usize::try_from(page.total).unwrap_or(usize::MAX);
            let total = self.track_total(reported);
            debug!(
                page = self.next_page,
                items = page.items.len(),
                collected = self.collected,
                total,
                "fetched stocks page"
            );
            self.next_page += 1;

            if page.items.is_empty() && self.collected < total {
                self.done = true;
                return Some(Err(ApiError::PaginationStalled {
                    collected: self.collected,
                    total,
                }));
            }
            self.buffered = page.items.into_iter();
        }
    }
}

impl<T: Transport> FusedIterator for ProductStocks<'_, T> {}

//! Pricing service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use bookshop::{
    activities::{
        Activity, ActivityId, ActivityKind,
        bundle::{self, BundleActivity},
        tiered_flat, tiered_percentage,
    },
    books::Book,
    cart::CartRequest,
    discounts,
    line_items::{ResolvedLineItem, Subtotal},
};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, debug, error, warn};

use crate::domain::{
    activities::{ActivitiesRepository, find_activity},
    books::BooksRepository,
    pricing::{
        ValidationFailure,
        errors::StrategyError,
        models::{AppliedActivity, PricingResult},
    },
};

/// Line items resolved for a cart, and the failure that cut resolution
/// short, if any.
struct Resolution {
    subtotal: Subtotal,
    interrupted: Option<StrategyError>,
}

/// Prices carts against injected book and activity repositories.
#[derive(Clone)]
pub struct DefaultPricingService {
    books: Arc<dyn BooksRepository>,
    activities: Arc<dyn ActivitiesRepository>,
}

impl Debug for DefaultPricingService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DefaultPricingService").finish_non_exhaustive()
    }
}

impl DefaultPricingService {
    /// Create a pricing service over the given repositories.
    #[must_use]
    pub fn new(books: Arc<dyn BooksRepository>, activities: Arc<dyn ActivitiesRepository>) -> Self {
        Self { books, activities }
    }

    /// Resolve each requested line to a priced line item, in request order.
    ///
    /// Books that are missing or not priced above zero are dropped. A failing
    /// lookup stops resolution and keeps the items resolved before it.
    async fn resolve(&self, request: &CartRequest) -> Resolution {
        let mut subtotal = Subtotal::new();

        for line in &request.lines {
            let book = match self.books.find_book(&line.book_id).await {
                Ok(Some(book)) => book,
                Ok(None) => {
                    debug!(book_id = %line.book_id, "book not found, dropping line");
                    continue;
                }
                Err(source) => {
                    return Resolution {
                        subtotal,
                        interrupted: Some(source.into()),
                    };
                }
            };

            let Some(item) = ResolvedLineItem::from_book(book, line.quantity) else {
                debug!(book_id = %line.book_id, "book has no positive price, dropping line");
                continue;
            };

            if let Err(source) = subtotal.push(item) {
                return Resolution {
                    subtotal,
                    interrupted: Some(source.into()),
                };
            }
        }

        Resolution {
            subtotal,
            interrupted: None,
        }
    }

    async fn price_without_activity(
        &self,
        request: &CartRequest,
        point_in_time: Timestamp,
    ) -> PricingResult {
        let Resolution {
            subtotal,
            interrupted,
        } = self.resolve(request).await;

        let (amount, items) = subtotal.into_parts();
        let result = PricingResult::base(amount, items, point_in_time);

        match interrupted {
            Some(source) => {
                report(&source, None);
                result.degraded()
            }
            None => result,
        }
    }

    async fn price_with_activity(
        &self,
        kind: ActivityKind,
        request: &CartRequest,
        point_in_time: Timestamp,
    ) -> Result<PricingResult, ValidationFailure> {
        let activity_id = ActivityId::from(request.activity_id.as_str());

        let activity = match find_activity(
            self.activities.as_ref(),
            kind,
            &activity_id,
            point_in_time,
        )
        .await
        {
            Ok(Some(activity)) => activity,
            Ok(None) => {
                return Err(ValidationFailure::ActivityNotFound { kind, activity_id });
            }
            Err(source) => {
                report(&StrategyError::from(source), Some(&activity_id));

                return Ok(PricingResult::base(Decimal::ZERO, Vec::new(), point_in_time).degraded());
            }
        };

        let Resolution {
            subtotal,
            interrupted,
        } = self.resolve(request).await;

        let (amount, items) = subtotal.into_parts();

        if let Some(source) = interrupted {
            report(&source, Some(&activity_id));

            return Ok(PricingResult::base(amount, items, point_in_time).degraded());
        }

        match self.apply(&activity, amount, &items).await {
            Ok((total_price, snapshot)) => Ok(PricingResult {
                applied_activity: Some(AppliedActivity { kind, snapshot }),
                ..PricingResult::base(total_price, items, point_in_time)
            }),
            Err(source) => {
                report(&source, Some(&activity_id));

                Ok(PricingResult::base(amount, items, point_in_time).degraded())
            }
        }
    }

    /// Apply an activity to a resolved subtotal, returning the discounted
    /// price and the snapshot of the configuration used.
    async fn apply(
        &self,
        activity: &Activity,
        subtotal: Decimal,
        items: &[ResolvedLineItem],
    ) -> Result<(Decimal, String), StrategyError> {
        match activity {
            Activity::TieredPercentage(config) => {
                let tiers = config.tiers()?;
                let factor = tiered_percentage::discount_factor(&tiers, subtotal);
                let price = tiered_percentage::apply(subtotal, factor)?;

                Ok((price, serde_json::to_string(config)?))
            }
            Activity::TieredFlatAmount(config) => {
                let tiers = config.tiers()?;
                let amount = tiered_flat::discount_amount(&tiers, subtotal);
                let price = tiered_flat::apply(subtotal, amount)?;

                Ok((price, serde_json::to_string(config)?))
            }
            Activity::Bundle(config) => {
                let discount = self.bundle_discount(config, items).await?;
                let price = discounts::sub(subtotal, discount)?;

                Ok((price, serde_json::to_string(config)?))
            }
        }
    }

    /// Sum the discount of every active rule over every line it covers.
    ///
    /// Each matching rule re-reads the book's price rather than reusing the
    /// resolved one, so the discount reflects the current price.
    async fn bundle_discount(
        &self,
        config: &BundleActivity,
        items: &[ResolvedLineItem],
    ) -> Result<Decimal, StrategyError> {
        let rules = config.rules()?;
        let mut total = Decimal::ZERO;

        for item in items {
            for rule in bundle::active_rules_for(&rules, &item.book_id) {
                let Some(book) = self
                    .books
                    .find_book(&item.book_id)
                    .await?
                    .filter(Book::is_priced)
                else {
                    continue;
                };

                total = discounts::add(total, rule.discount(book.price, item.quantity)?)?;
            }
        }

        Ok(total)
    }
}

fn report(source: &StrategyError, activity_id: Option<&ActivityId>) {
    let activity_id = activity_id.map_or("", ActivityId::as_str);

    match source {
        StrategyError::Repository(inner) => error!(
            error_kind = source.kind(),
            activity_id,
            error = %inner,
            "pricing degraded by storage failure"
        ),
        StrategyError::Snapshot(inner) => error!(
            error_kind = source.kind(),
            activity_id,
            error = %inner,
            "pricing degraded by activity snapshot serialization failure"
        ),
        StrategyError::Config(inner) => warn!(
            error_kind = source.kind(),
            activity_id,
            error = %inner,
            "pricing degraded by malformed activity configuration"
        ),
        StrategyError::Discount(inner) => warn!(
            error_kind = source.kind(),
            activity_id,
            error = %inner,
            "pricing degraded by arithmetic overflow"
        ),
    }
}

#[async_trait]
impl PricingService for DefaultPricingService {
    #[tracing::instrument(
        name = "pricing.service.calculate_price",
        skip(self, request, point_in_time),
        fields(
            activity_type = request.activity_type,
            activity_id = %request.activity_id,
            line_count = request.lines.len(),
            point_in_time = %point_in_time,
            total_price = tracing::field::Empty,
            error_code = tracing::field::Empty
        ),
        err(level = "warn")
    )]
    async fn calculate_price(
        &self,
        request: &CartRequest,
        point_in_time: Timestamp,
    ) -> Result<PricingResult, ValidationFailure> {
        request.ensure_unique_books()?;

        let result = match ActivityKind::from_code(request.activity_type) {
            Some(kind) => {
                self.price_with_activity(kind, request, point_in_time)
                    .await?
            }
            None => self.price_without_activity(request, point_in_time).await,
        };

        let span = Span::current();

        span.record("total_price", tracing::field::display(result.total_price));
        span.record("error_code", result.error_code.code());

        Ok(result)
    }
}

#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price a cart as of `point_in_time`.
    ///
    /// Every activity validity check in the call uses `point_in_time`, and it
    /// is reported back as the result's computation time.
    async fn calculate_price(
        &self,
        request: &CartRequest,
        point_in_time: Timestamp,
    ) -> Result<PricingResult, ValidationFailure>;
}

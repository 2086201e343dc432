//! Integration tests pricing whole carts through the pure core.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use testresult::TestResult;

use bookshop::{
    activities::{
        bundle::{self, BundleActivity, BundleRuleRecord},
        tiered_flat::{self, FlatLevelRecord, TieredFlatActivity},
        tiered_percentage::{self, PercentageLevelRecord, TieredPercentageActivity},
    },
    books::Book,
    cart::{CartRequest, LineRequest},
    discounts,
    line_items::{ResolvedLineItem, Subtotal},
};

fn shelf() -> Vec<Book> {
    vec![
        Book::new("dune", dec!(50)),
        Book::new("emma", dec!(25)),
        Book::new("ulysses", dec!(40)),
        Book::new("giveaway", dec!(0)),
    ]
}

fn subtotal(request: &CartRequest) -> TestResult<Subtotal> {
    request.ensure_unique_books()?;

    let shelf = shelf();
    let mut subtotal = Subtotal::new();

    for line in &request.lines {
        let Some(book) = shelf.iter().find(|book| book.id == line.book_id) else {
            continue;
        };

        if let Some(item) = ResolvedLineItem::from_book(book.clone(), line.quantity) {
            subtotal.push(item)?;
        }
    }

    Ok(subtotal)
}

/// dune 2 * 50 + emma 4 * 25 + ulysses 1 * 40 = 240
/// giveaway is unpriced and missing is unknown; both are dropped
fn cart() -> CartRequest {
    CartRequest::new([
        LineRequest::new("dune", 2),
        LineRequest::new("giveaway", 3),
        LineRequest::new("emma", 4),
        LineRequest::new("missing", 1),
        LineRequest::new("ulysses", 1),
    ])
}

#[test]
fn subtotal_keeps_priced_books_in_request_order() -> TestResult {
    let subtotal = subtotal(&cart())?;

    let ids: Vec<&str> = subtotal
        .items()
        .iter()
        .map(|item| item.book_id.as_str())
        .collect();

    assert_eq!(subtotal.amount(), dec!(240));
    assert_eq!(ids, ["dune", "emma", "ulysses"]);

    Ok(())
}

/// 240 reaches the 200 tier: floor(240 * 0.85) = 204
#[test]
fn percentage_tiers_scale_the_subtotal() -> TestResult {
    let activity = TieredPercentageActivity::new(
        "autumn",
        vec![
            PercentageLevelRecord::new(dec!(100), dec!(0.9)),
            PercentageLevelRecord::new(dec!(200), dec!(0.85)),
            PercentageLevelRecord::new(dec!(300), dec!(0.7)),
        ],
    );

    let subtotal = subtotal(&cart())?.amount();
    let factor = tiered_percentage::discount_factor(&activity.tiers()?, subtotal);

    assert_eq!(factor, dec!(0.85));
    assert_eq!(tiered_percentage::apply(subtotal, factor)?, dec!(204));

    Ok(())
}

/// 240 reaches the 150 tier only: 240 - 15 = 225
#[test]
fn flat_tiers_subtract_the_selected_amount() -> TestResult {
    let activity = TieredFlatActivity::new(
        "spring",
        vec![
            FlatLevelRecord::new(dec!(150), dec!(15)),
            FlatLevelRecord::new(dec!(250), dec!(40)),
        ],
    );

    let subtotal = subtotal(&cart())?.amount();
    let amount = tiered_flat::discount_amount(&activity.tiers()?, subtotal);

    assert_eq!(tiered_flat::apply(subtotal, amount)?, dec!(225));

    Ok(())
}

/// emma: 4 / 2 = 2 sets, 2 * 25 = 50 off; dune: 2 / 3 = 0 sets
/// the inactive rule (by 0) contributes nothing: 240 - 50 = 190
#[test]
fn bundle_rules_discount_complete_sets() -> TestResult {
    let activity = BundleActivity::new(
        "pairs",
        vec![
            BundleRuleRecord::new(["emma"], 2, 1),
            BundleRuleRecord::new(["dune"], 3, 1),
            BundleRuleRecord::new(["emma", "ulysses"], 0, 1),
        ],
    );

    let rules = activity.rules()?;
    let (amount, items) = subtotal(&cart())?.into_parts();

    let mut discount = Decimal::ZERO;

    for item in &items {
        for rule in bundle::active_rules_for(&rules, &item.book_id) {
            discount = discounts::add(discount, rule.discount(item.unit_price, item.quantity)?)?;
        }
    }

    assert_eq!(discounts::sub(amount, discount)?, dec!(190));

    Ok(())
}

#[test]
fn repeated_book_is_reported_before_pricing() {
    let request = CartRequest::new([
        LineRequest::new("dune", 1),
        LineRequest::new("emma", 1),
        LineRequest::new("dune", 2),
    ]);

    let error = request.ensure_unique_books().err();

    assert_eq!(
        error.map(|duplicate| duplicate.book_id.as_str().to_string()),
        Some("dune".to_string())
    );
}

//! Suggestion tick.

use tracing::debug;

use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::promotion::{percent, Promotion, PromotionKind, SuggestionConfig};

/// Run one suggestion tick.
///
/// Does nothing until the shopper has selected a product. Otherwise the first
/// in-stock product, in catalog order, whose id differs from the last
/// selection gets `rate` off its current price.
pub fn run_suggestion(
    catalog: &mut Catalog,
    last_selected: Option<&ProductId>,
    config: &SuggestionConfig,
) -> Option<Promotion> {
    let last_selected = last_selected?;
    let Some(product) = catalog
        .list_products()
        .iter()
        .find(|p| p.id() != last_selected && p.is_in_stock())
    else {
        debug!(%last_selected, "no product to suggest");
        return None;
    };

    let product_id = product.id().clone();
    let product_name = product.name().to_string();
    let new_price = catalog
        .apply_discount_to_price(&product_id, config.rate)
        .ok()?;

    let message = format!(
        "{}은(는) 어떠세요? 지금 구매하시면 {}% 추가 할인!",
        product_name,
        percent(config.rate)
    );
    Some(Promotion {
        kind: PromotionKind::Suggestion,
        product_id,
        product_name,
        new_price,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed_products, Product};
    use crate::money::Won;

    fn seed() -> Catalog {
        Catalog::new(seed_products()).unwrap()
    }

    #[test]
    fn test_no_selection_is_noop() {
        let mut catalog = seed();
        let before = catalog.clone();
        assert!(run_suggestion(&mut catalog, None, &SuggestionConfig::default()).is_none());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_suggests_first_other_product() {
        let mut catalog = seed();
        let promo =
            run_suggestion(&mut catalog, Some(&"p1".into()), &SuggestionConfig::default())
                .unwrap();
        assert_eq!(promo.kind, PromotionKind::Suggestion);
        assert_eq!(promo.product_id.as_str(), "p2");
        assert_eq!(promo.new_price, Won::new(19000));
        assert_eq!(
            promo.message,
            "상품2은(는) 어떠세요? 지금 구매하시면 5% 추가 할인!"
        );
    }

    #[test]
    fn test_suggestion_skips_sold_out() {
        let mut catalog = Catalog::new(vec![
            Product::new("a", "A", Won::new(1000), 1),
            Product::new("b", "B", Won::new(2000), 0),
            Product::new("c", "C", Won::new(3000), 2),
        ])
        .unwrap();
        let promo =
            run_suggestion(&mut catalog, Some(&"a".into()), &SuggestionConfig::default())
                .unwrap();
        assert_eq!(promo.product_id.as_str(), "c");
        assert_eq!(promo.new_price, Won::new(2850));
    }

    #[test]
    fn test_no_candidate_is_noop() {
        let mut catalog =
            Catalog::new(vec![Product::new("a", "A", Won::new(1000), 1)]).unwrap();
        assert!(
            run_suggestion(&mut catalog, Some(&"a".into()), &SuggestionConfig::default())
                .is_none()
        );
    }
}

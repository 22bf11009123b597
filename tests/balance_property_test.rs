use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vending_engine::application::outcome::PurchaseOutcome;
use vending_engine::domain::money::{Denomination, Money};

mod common;

#[tokio::test]
async fn test_balance_is_sum_of_inserted_coins() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..25 {
        // 50 coins of at most 2.00 never reach the 999.99 price.
        let machine = common::machine(&[("Z1", "Gold bar", "999.99", 1)], &[]).await;
        machine.select_product("Z1").await.unwrap();

        let mut expected = Money::ZERO;
        let count = rng.gen_range(1..=50);
        for _ in 0..count {
            let coin = Denomination::ALL[rng.gen_range(0..Denomination::ALL.len())];
            expected = expected + coin.value();
            let outcome = machine.insert_money(coin).await.unwrap();
            assert!(matches!(outcome, PurchaseOutcome::Unsold { .. }));
        }

        assert_eq!(machine.return_balance().await, expected);
    }
}

#[tokio::test]
async fn test_outstanding_amount_matches_balance() {
    let mut rng = StdRng::seed_from_u64(11);
    let price: Money = "999.99".parse().unwrap();
    let machine = common::machine(&[("Z1", "Gold bar", "999.99", 1)], &[]).await;
    machine.select_product("Z1").await.unwrap();

    for _ in 0..40 {
        let coin = Denomination::ALL[rng.gen_range(0..Denomination::ALL.len())];
        let outcome = machine.insert_money(coin).await.unwrap();
        let balance = machine.return_balance().await;
        assert_eq!(
            outcome,
            PurchaseOutcome::Unsold {
                outstanding: price - balance
            }
        );
    }
}

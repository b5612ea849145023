/// cost of owning - drive a house and its mortgage in lockstep
///
/// Run with `RUST_LOG=trace` to see every monthly step.
use housing_model::{HouseConfig, MortgageConfig, Rate};

const SCENARIO_MORTGAGE: &str = r#"{
    "principal": "650000",
    "down_payment_ratio": "0.2",
    "mortgage_rate": "0.0475",
    "amortization_years": "25",
    "compounding": "semi-annually"
}"#;

const SCENARIO_HOUSE: &str = r#"{
    "house_price": "650000",
    "bedrooms": 3,
    "bathrooms": 2,
    "property_taxes": "4800",
    "maintenance_fees": "350"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut mortgage = serde_json::from_str::<MortgageConfig>(SCENARIO_MORTGAGE)?.build()?;
    let mut house = serde_json::from_str::<HouseConfig>(SCENARIO_HOUSE)?.build()?;

    // 3% annual appreciation applied monthly
    let monthly_growth = Rate::from_percentage(3).monthly_rate();
    let months = 10 * 12;

    println!(
        "{:>5} {:>14} {:>14} {:>14} {:>14}",
        "month", "house price", "balance", "paid", "expenses"
    );
    for _ in 0..months {
        mortgage.update_balance()?;
        house.update_house_price(monthly_growth)?;

        if house.month() % 12 == 0 {
            println!(
                "{:>5} {:>14} {:>14} {:>14} {:>14}",
                house.month(),
                house.house_price().round_dp(2),
                mortgage.balance().round_dp(2),
                mortgage.total_paid().round_dp(2),
                house.expenses().round_dp(2),
            );
        }
    }

    let equity = house.house_price() - mortgage.balance();
    let cost = mortgage.interest_paid() + house.expenses();
    println!("\nafter {} months:", months);
    println!("  equity:             ${}", equity.round_dp(2));
    println!("  interest paid:      ${}", mortgage.interest_paid().round_dp(2));
    println!("  carrying costs:     ${}", house.expenses().round_dp(2));
    println!("  unrecoverable cost: ${}", cost.round_dp(2));

    Ok(())
}

/// quick start - price a mortgage and print its first year
use housing_model::{CompoundingFrequency, Decimal, Money, Mortgage, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $400,000 home, 20% down, 5% compounded semi-annually over 25 years
    let mut mortgage = Mortgage::builder()
        .principal(Money::from_major(400_000))
        .down_payment_ratio(Rate::from_percentage(20))
        .rate(Rate::from_percentage(5))
        .amortization_years(Decimal::from(25))
        .compounding(CompoundingFrequency::SemiAnnually)
        .build()?;

    println!("down payment:    ${}", mortgage.down_payment());
    println!("loan amount:     ${}", mortgage.loan_amount());
    println!("monthly payment: ${}", mortgage.monthly_payment()?.round_dp(2));
    println!();

    for _ in 0..12 {
        mortgage.update_balance()?;
        println!(
            "period {:>3}: balance ${:>12}  total paid ${:>12}",
            mortgage.period(),
            mortgage.balance().round_dp(2),
            mortgage.total_paid().round_dp(2),
        );
    }

    let schedule = mortgage.schedule()?;
    println!("\nremaining payments: {}", schedule.len());
    println!("remaining interest: ${}", schedule.total_interest.round_dp(2));

    Ok(())
}

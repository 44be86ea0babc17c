/// validation - rule engine aggregating every failure
use loan_wallet_rs::{
    component_rules, ComponentKind, FinancialComponent, Money, ValidationEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== component validation ===\n");

    let engine = ValidationEngine::new(component_rules());

    let good = FinancialComponent::new(ComponentKind::Principal, Money::from_major(100));
    println!("valid component: {:?}", engine.validate(&good).is_ok());

    // balance above original and negative original, reported together
    let corrupt = FinancialComponent::with_balance(
        ComponentKind::Interest,
        Money::from_major(-10),
        Money::from_major(150),
    );

    match engine.validate(&corrupt) {
        Ok(_) => println!("unexpectedly valid"),
        Err(errors) => {
            println!("corrupt component failed {} rules:", errors.len());
            for error in &errors {
                println!("  {}", error);
            }
        }
    }

    Ok(())
}

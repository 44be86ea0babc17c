use crate::decimal::Rate;
use crate::installment::FinancialComponent;
use crate::payments::AmortizationPolicy;
use crate::schedule::RecalculationPolicy;
use crate::validation::{component_rules, ValidationEngine};

/// wallet configuration
///
/// Built once at wallet-creation time and owned by the aggregate; there is
/// no process-wide policy registry. The component rule set is part of the
/// configuration so rule variations stay per-wallet.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// contract's nominal annual rate, used by schedule recalculation
    pub interest_rate: Rate,
    pub amortization: AmortizationPolicy,
    pub recalculation: Option<RecalculationPolicy>,
    pub component_rules: ValidationEngine<FinancialComponent>,
}

impl WalletConfig {
    /// standard fixed-value contract: arrears-first allocation with
    /// equal-installment recalculation
    pub fn standard(interest_rate: Rate) -> Self {
        Self {
            interest_rate,
            amortization: AmortizationPolicy::ArrearsFirst,
            recalculation: Some(RecalculationPolicy::EqualInstallment),
            component_rules: ValidationEngine::new(component_rules()),
        }
    }

    /// index-linked contract: the schedule follows the index, so no
    /// recalculation policy is configured
    pub fn index_linked(interest_rate: Rate) -> Self {
        Self {
            interest_rate,
            amortization: AmortizationPolicy::ArrearsFirst,
            recalculation: None,
            component_rules: ValidationEngine::new(component_rules()),
        }
    }

    /// override the allocation policy
    pub fn with_amortization(mut self, policy: AmortizationPolicy) -> Self {
        self.amortization = policy;
        self
    }

    /// override the recalculation policy
    pub fn with_recalculation(mut self, policy: RecalculationPolicy) -> Self {
        self.recalculation = Some(policy);
        self
    }
}

//! Vault action modals and the guided tour.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Smallest deposit the vault accepts, in BTC.
pub const MIN_DEPOSIT_BTC: Decimal = dec!(0.001);

/// CDR a position must stay above, percent.
pub const REQUIRED_CDR: Decimal = dec!(150);

/// Borrow rate shown in the borrow modal, percent APR.
pub const BORROW_APR: Decimal = dec!(5.8);

/// The four vault operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Deposit,
    Withdraw,
    Borrow,
    Repay,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Deposit,
        ActionKind::Withdraw,
        ActionKind::Borrow,
        ActionKind::Repay,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActionKind::Deposit => "Deposit BTC",
            ActionKind::Withdraw => "Withdraw BTC",
            ActionKind::Borrow => "Borrow USDC",
            ActionKind::Repay => "Repay USDC",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActionKind::Deposit => "Deposit your BTC to earn yield",
            ActionKind::Withdraw => "Withdraw your deposited BTC",
            ActionKind::Borrow => "Borrow USDC against your BTC",
            ActionKind::Repay => "Repay your borrowed USDC",
        }
    }

    /// Short label for menus.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Deposit => "Deposit",
            ActionKind::Withdraw => "Withdraw",
            ActionKind::Borrow => "Borrow",
            ActionKind::Repay => "Repay",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            ActionKind::Deposit => "Add BTC to vault",
            ActionKind::Withdraw => "Get BTC from vault",
            ActionKind::Borrow => "Get USDC against BTC",
            ActionKind::Repay => "Pay back USDC",
        }
    }

    /// Asset the amount is denominated in.
    pub fn unit(self) -> &'static str {
        match self {
            ActionKind::Deposit | ActionKind::Withdraw => "BTC",
            ActionKind::Borrow | ActionKind::Repay => "USDC",
        }
    }

    pub fn steps(self) -> [&'static str; 4] {
        match self {
            ActionKind::Deposit => [
                "Connect your Starknet wallet",
                "Enter the amount of BTC you want to deposit",
                "Approve the transaction",
                "Your BTC will start earning yield automatically",
            ],
            ActionKind::Withdraw => [
                "Ensure your position is healthy (CDR > 150%)",
                "Enter the amount you want to withdraw",
                "Confirm the transaction",
                "BTC will be sent to your wallet",
            ],
            ActionKind::Borrow => [
                "Deposit BTC as collateral first",
                "Enter the USDC amount to borrow",
                "Ensure CDR stays above 150%",
                "Receive USDC in your wallet",
            ],
            ActionKind::Repay => [
                "Check your outstanding debt",
                "Enter repayment amount",
                "Approve USDC spending",
                "Your debt will be reduced",
            ],
        }
    }

    pub fn benefits(self) -> [&'static str; 3] {
        match self {
            ActionKind::Deposit => [
                "Earn 4.2% APY on your Bitcoin",
                "Auto-compound your earnings",
                "Dynamic risk protection",
            ],
            ActionKind::Withdraw => [
                "Instant withdrawals",
                "Maintain healthy collateral ratio",
                "Keep earned yield",
            ],
            ActionKind::Borrow => [
                "Access liquidity without selling BTC",
                "Dynamic CDR protection",
                "Flexible repayment terms",
            ],
            ActionKind::Repay => [
                "Reduce liquidation risk",
                "Lower interest payments",
                "Unlock more borrowing capacity",
            ],
        }
    }

    pub fn notes(self) -> [&'static str; 2] {
        match self {
            ActionKind::Deposit => [
                "Minimum deposit: 0.001 BTC",
                "Your BTC will be automatically invested in yield strategies",
            ],
            ActionKind::Withdraw => [
                "Ensure sufficient collateral remains after withdrawal",
                "You can withdraw earned yield anytime",
            ],
            ActionKind::Borrow => [
                "Maintain CDR above 150% to avoid liquidation",
                "Interest rate: 5.8% APR",
            ],
            ActionKind::Repay => [
                "Partial repayments are allowed",
                "Repaying improves your position health",
            ],
        }
    }
}

/// Whether the modal collects an amount or walks through a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Transaction,
    Guide,
}

/// An open action modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionModal {
    pub kind: ActionKind,
    pub mode: ModalMode,
    /// Amount typed so far.
    pub amount: String,
}

impl ActionModal {
    pub fn transaction(kind: ActionKind) -> Self {
        Self {
            kind,
            mode: ModalMode::Transaction,
            amount: String::new(),
        }
    }

    pub fn guide(kind: ActionKind) -> Self {
        Self {
            kind,
            mode: ModalMode::Guide,
            amount: String::new(),
        }
    }

    pub fn is_guide(&self) -> bool {
        self.mode == ModalMode::Guide
    }

    pub fn heading(&self) -> String {
        match self.mode {
            ModalMode::Transaction => self.kind.title().to_string(),
            ModalMode::Guide => format!("Guide: {}", self.kind.title()),
        }
    }

    pub fn subheading(&self) -> String {
        match self.mode {
            ModalMode::Transaction => self.kind.description().to_string(),
            ModalMode::Guide => format!(
                "Learn how to {}",
                self.kind.description().to_lowercase()
            ),
        }
    }

    /// Accept digits and a single decimal point.
    pub fn push_char(&mut self, c: char) {
        match c {
            '0'..='9' => self.amount.push(c),
            '.' if !self.amount.contains('.') => {
                if self.amount.is_empty() {
                    self.amount.push('0');
                }
                self.amount.push('.');
            }
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        self.amount.pop();
    }

    /// Validate the typed amount.
    pub fn parsed_amount(&self) -> Result<Decimal, String> {
        if self.amount.is_empty() {
            return Err("Enter an amount".to_string());
        }
        let amount = Decimal::from_str(&self.amount)
            .map_err(|_| format!("'{}' is not a valid amount", self.amount))?;

        if amount <= Decimal::ZERO {
            return Err("Amount must be greater than zero".to_string());
        }
        if self.kind == ActionKind::Deposit && amount < MIN_DEPOSIT_BTC {
            return Err(format!("Minimum deposit is {MIN_DEPOSIT_BTC} BTC"));
        }
        Ok(amount)
    }
}

/// One stop on the "How It Works" tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideStep {
    pub title: &'static str,
    pub description: &'static str,
    /// Modal the step leads to, if any.
    pub action: Option<ActionKind>,
}

pub const GUIDE_STEPS: [GuideStep; 4] = [
    GuideStep {
        title: "Deposit BTC",
        description: "Start by depositing your Bitcoin to begin earning yield",
        action: Some(ActionKind::Deposit),
    },
    GuideStep {
        title: "Earn Yield",
        description: "Your BTC automatically earns yield through optimized strategies",
        action: None,
    },
    GuideStep {
        title: "Borrow USDC",
        description: "Borrow USDC against your deposited Bitcoin",
        action: Some(ActionKind::Borrow),
    },
    GuideStep {
        title: "Manage Position",
        description: "Repay loans or withdraw your Bitcoin anytime",
        action: Some(ActionKind::Repay),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_input_filters_characters() {
        let mut modal = ActionModal::transaction(ActionKind::Borrow);
        for c in ".5a.0-1".chars() {
            modal.push_char(c);
        }
        assert_eq!(modal.amount, "0.501");
        modal.pop_char();
        assert_eq!(modal.amount, "0.50");
        assert_eq!(modal.parsed_amount(), Ok(dec!(0.50)));
    }

    #[test]
    fn test_deposit_minimum() {
        let mut modal = ActionModal::transaction(ActionKind::Deposit);
        modal.amount = "0.0005".to_string();
        assert_eq!(
            modal.parsed_amount(),
            Err("Minimum deposit is 0.001 BTC".to_string())
        );

        modal.amount = "0.001".to_string();
        assert_eq!(modal.parsed_amount(), Ok(dec!(0.001)));
    }

    #[test]
    fn test_zero_and_empty_amounts_rejected() {
        let mut modal = ActionModal::transaction(ActionKind::Repay);
        assert!(modal.parsed_amount().is_err());
        modal.amount = "0.0".to_string();
        assert_eq!(
            modal.parsed_amount(),
            Err("Amount must be greater than zero".to_string())
        );
    }

    #[test]
    fn test_guide_headings() {
        let modal = ActionModal::guide(ActionKind::Withdraw);
        assert!(modal.is_guide());
        assert_eq!(modal.heading(), "Guide: Withdraw BTC");
        assert_eq!(
            modal.subheading(),
            "Learn how to withdraw your deposited btc"
        );
    }

    #[test]
    fn test_guide_steps_link_to_modals() {
        let linked: Vec<_> = GUIDE_STEPS.iter().filter_map(|s| s.action).collect();
        assert_eq!(
            linked,
            vec![ActionKind::Deposit, ActionKind::Borrow, ActionKind::Repay]
        );
    }
}

//! Investment strategy tools: plan generation, portfolio allocation, risk
//! scoring, tax tables and SIP planning.

use super::platforms::inr;
use super::{Tool, ToolReply};
use crate::types::ToolDefinition;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

fn parse_args<T>(arguments: Value) -> Result<T, ToolReply>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(arguments)
        .map_err(|source| ToolReply::failure(format!("invalid tool arguments: {source}")))
}

/// `create_indian_investment_plan`
pub struct InvestmentPlanTool {
    definition: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct InvestmentPlanArgs {
    #[serde(rename = "riskLevel")]
    risk_level: RiskLevel,
    #[serde(rename = "investmentAmount")]
    investment_amount: f64,
    #[serde(rename = "timeHorizon")]
    time_horizon: f64,
    #[serde(rename = "monthlyIncome")]
    monthly_income: Option<f64>,
}

impl InvestmentPlanTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "create_indian_investment_plan".into(),
                description: "Generate personalized gold investment strategies for Indian investors"
                    .into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "riskLevel": {
                            "type": "string",
                            "enum": ["low", "medium", "high"],
                            "description": "Risk tolerance level"
                        },
                        "investmentAmount": {
                            "type": "number",
                            "description": "Total investment amount in INR"
                        },
                        "timeHorizon": {
                            "type": "number",
                            "description": "Investment time horizon in years"
                        },
                        "monthlyIncome": {
                            "type": "number",
                            "description": "Monthly income in INR (optional, for SIP planning)"
                        }
                    },
                    "required": ["riskLevel", "investmentAmount", "timeHorizon"]
                }),
            },
        }
    }
}

#[async_trait]
impl Tool for InvestmentPlanTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, arguments: Value) -> ToolReply {
        let args: InvestmentPlanArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        let (allocation, strategy, expected_returns) = match args.risk_level {
            RiskLevel::Low => (
                json!({
                    "physical_gold": 40,
                    "gold_etf": 25,
                    "sovereign_bonds": 30,
                    "gold_mining_stocks": 0,
                    "digital_gold": 5
                }),
                vec![
                    "Focus on capital preservation over growth",
                    "Prioritize physical gold and government-backed instruments",
                    "Avoid volatile gold mining stocks",
                    "Use SIP approach to average purchase prices",
                    "Keep some liquid ETF holdings for emergency needs",
                ],
                "8-12% annually (primarily from gold price appreciation + 2.5% SGB interest)",
            ),
            RiskLevel::Medium => (
                json!({
                    "physical_gold": 25,
                    "gold_etf": 35,
                    "sovereign_bonds": 25,
                    "gold_mining_stocks": 10,
                    "digital_gold": 5
                }),
                vec![
                    "Balance between growth and stability",
                    "Use ETFs as primary investment vehicle",
                    "Small allocation to mining stocks for leverage",
                    "Rebalance portfolio quarterly",
                    "Time purchases around festivals for better rates",
                ],
                "12-18% annually (gold appreciation + dividend from mining stocks)",
            ),
            RiskLevel::High => (
                json!({
                    "physical_gold": 15,
                    "gold_etf": 30,
                    "sovereign_bonds": 15,
                    "gold_mining_stocks": 35,
                    "digital_gold": 5
                }),
                vec![
                    "Maximize growth potential through mining stocks",
                    "Active portfolio management and rebalancing",
                    "Use leverage through mining stock exposure",
                    "Consider international gold mining funds",
                    "Monitor commodity cycles for tactical allocation",
                ],
                "15-25% annually (higher volatility, potential for significant gains)",
            ),
        };

        let monthly_investment = args.monthly_income.map(|income| {
            (args.investment_amount / (args.time_horizon * 12.0)).min(income * 0.15)
        });
        let diversified_types = allocation
            .as_object()
            .map(|map| {
                map.values()
                    .filter(|value| value.as_i64().unwrap_or(0) > 0)
                    .count()
            })
            .unwrap_or(0);
        let rebalance_cadence = match args.risk_level {
            RiskLevel::High => "monthly",
            RiskLevel::Medium => "quarterly",
            RiskLevel::Low => "half-yearly",
        };
        let sip_suggestion = monthly_investment
            .map(|amount| format!("₹{}", inr(amount)))
            .unwrap_or_else(|| "N/A".to_string());
        let recommendations = vec![
            format!(
                "Start with {} risk strategy given your profile",
                args.risk_level.as_str()
            ),
            format!("Diversify across {diversified_types} different gold investment types"),
            format!("Consider SIP of {sip_suggestion} per month"),
            format!("Review and rebalance {rebalance_cadence}"),
            "Take advantage of festival seasons (Dhanteras, Akshaya Tritiya) for purchases"
                .to_string(),
        ];

        let data = json!({
            "risk_level": args.risk_level.as_str(),
            "total_amount": args.investment_amount,
            "duration": format!("{} years", args.time_horizon),
            "allocation": allocation,
            "strategy": strategy,
            "expected_returns": expected_returns,
            "recommendations": recommendations,
            "monthly_investment": monthly_investment,
        });
        ToolReply::ok(
            data,
            format!(
                "Investment plan created for {} risk {}-year strategy",
                args.risk_level.as_str(),
                args.time_horizon
            ),
        )
    }
}

/// `portfolio_allocation_india`
pub struct PortfolioAllocationTool {
    definition: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct PortfolioAllocationArgs {
    #[serde(rename = "riskLevel")]
    risk_level: RiskLevel,
    #[serde(rename = "totalPortfolioValue")]
    total_portfolio_value: f64,
    #[serde(rename = "currentGoldHolding")]
    current_gold_holding: Option<f64>,
}

impl PortfolioAllocationTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "portfolio_allocation_india".into(),
                description: "Suggest optimal gold allocation considering Indian investment patterns"
                    .into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "riskLevel": {
                            "type": "string",
                            "enum": ["low", "medium", "high"],
                            "description": "Risk tolerance level"
                        },
                        "totalPortfolioValue": {
                            "type": "number",
                            "description": "Total portfolio value in INR"
                        },
                        "currentGoldHolding": {
                            "type": "number",
                            "description": "Current gold holding value in INR (optional)"
                        }
                    },
                    "required": ["riskLevel", "totalPortfolioValue"]
                }),
            },
        }
    }
}

#[async_trait]
impl Tool for PortfolioAllocationTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, arguments: Value) -> ToolReply {
        let args: PortfolioAllocationArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        let (gold_percentage, breakdown, reasoning, rebalancing) = match args.risk_level {
            RiskLevel::Low => (
                15.0,
                json!({ "physical": 50, "etf": 30, "bonds": 20, "stocks": 0 }),
                vec![
                    "15% gold allocation provides inflation hedge without overexposure",
                    "Physical gold (50%) offers security and cultural value",
                    "ETFs (30%) provide liquidity and low-cost exposure",
                    "Sovereign Gold Bonds (20%) offer additional 2.5% interest",
                    "No mining stocks due to volatility concerns",
                ],
                "Half-yearly",
            ),
            RiskLevel::Medium => (
                20.0,
                json!({ "physical": 30, "etf": 40, "bonds": 20, "stocks": 10 }),
                vec![
                    "20% gold allocation balances growth with stability",
                    "ETFs (40%) as primary vehicle for cost efficiency",
                    "Physical gold (30%) maintains cultural and emergency value",
                    "SGBs (20%) for tax-efficient returns",
                    "Small mining stock exposure (10%) for leverage",
                ],
                "Quarterly",
            ),
            RiskLevel::High => (
                25.0,
                json!({ "physical": 20, "etf": 35, "bonds": 15, "stocks": 30 }),
                vec![
                    "25% gold allocation maximizes commodity exposure",
                    "Higher mining stock allocation (30%) for leverage to gold prices",
                    "ETFs (35%) for active trading and rebalancing",
                    "Reduced physical holding (20%) to focus on returns",
                    "Minimal SGBs (15%) to maintain some safety",
                ],
                "Monthly",
            ),
        };

        let gold_allocation_amount = args.total_portfolio_value * gold_percentage / 100.0;
        let mut message = format!(
            "Optimal gold allocation: {gold_percentage}% (₹{})",
            inr(gold_allocation_amount)
        );
        if let Some(current) = args.current_gold_holding {
            let current_percentage = current / args.total_portfolio_value * 100.0;
            if current_percentage > gold_percentage + 5.0 {
                message.push_str(&format!(
                    " | Currently over-allocated at {current_percentage:.1}% - consider reducing"
                ));
            } else if current_percentage < gold_percentage - 5.0 {
                message.push_str(&format!(
                    " | Currently under-allocated at {current_percentage:.1}% - consider increasing"
                ));
            } else {
                message.push_str(&format!(
                    " | Current allocation {current_percentage:.1}% is optimal"
                ));
            }
        }

        let data = json!({
            "risk_profile": args.risk_level.as_str(),
            "gold_percentage": gold_percentage,
            "total_portfolio_value": args.total_portfolio_value,
            "gold_allocation": {
                "amount": gold_allocation_amount,
                "breakdown": breakdown,
            },
            "reasoning": reasoning,
            "rebalancing_frequency": rebalancing,
        });
        ToolReply::ok(data, message)
    }
}

/// `risk_assessment_indian`
pub struct RiskAssessmentTool {
    definition: ToolDefinition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ExperienceLevel {
    Beginner,
    Intermediate,
    Experienced,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum InvestmentGoal {
    WealthPreservation,
    Growth,
    Speculation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LiquidityNeeds {
    High,
    Medium,
    Low,
}

#[derive(Debug, Deserialize)]
struct RiskAssessmentArgs {
    age: f64,
    #[serde(rename = "monthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "investmentExperience")]
    investment_experience: ExperienceLevel,
    #[serde(rename = "investmentGoal")]
    investment_goal: InvestmentGoal,
    #[serde(rename = "liquidityNeeds")]
    liquidity_needs: LiquidityNeeds,
}

impl RiskAssessmentTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "risk_assessment_indian".into(),
                description: "Assess user's risk tolerance specific to Indian market conditions"
                    .into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "age": { "type": "number", "description": "Age of the investor" },
                        "monthlyIncome": {
                            "type": "number",
                            "description": "Monthly income in INR"
                        },
                        "investmentExperience": {
                            "type": "string",
                            "enum": ["beginner", "intermediate", "experienced"],
                            "description": "Investment experience level"
                        },
                        "investmentGoal": {
                            "type": "string",
                            "enum": ["wealth_preservation", "growth", "speculation"],
                            "description": "Primary investment goal"
                        },
                        "liquidityNeeds": {
                            "type": "string",
                            "enum": ["high", "medium", "low"],
                            "description": "Liquidity requirements"
                        }
                    },
                    "required": [
                        "age",
                        "monthlyIncome",
                        "investmentExperience",
                        "investmentGoal",
                        "liquidityNeeds"
                    ]
                }),
            },
        }
    }

    fn score(args: &RiskAssessmentArgs) -> u32 {
        let mut score = 0;
        score += if args.age <= 30.0 {
            3
        } else if args.age <= 45.0 {
            2
        } else if args.age <= 60.0 {
            1
        } else {
            0
        };
        score += if args.monthly_income >= 200_000.0 {
            3
        } else if args.monthly_income >= 100_000.0 {
            2
        } else if args.monthly_income >= 50_000.0 {
            1
        } else {
            0
        };
        score += match args.investment_experience {
            ExperienceLevel::Experienced => 3,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Beginner => 1,
        };
        score += match args.investment_goal {
            InvestmentGoal::Speculation => 3,
            InvestmentGoal::Growth => 2,
            InvestmentGoal::WealthPreservation => 1,
        };
        score += match args.liquidity_needs {
            LiquidityNeeds::Low => 3,
            LiquidityNeeds::Medium => 2,
            LiquidityNeeds::High => 1,
        };
        score
    }
}

#[async_trait]
impl Tool for RiskAssessmentTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, arguments: Value) -> ToolReply {
        let args: RiskAssessmentArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        let score = Self::score(&args);
        let (risk_level, profile, suitable, warnings, max_allocation, horizon) = if score <= 7 {
            (
                RiskLevel::Low,
                "Conservative Investor - You prioritize capital preservation and are comfortable with modest returns.",
                vec![
                    "Sovereign Gold Bonds (primary recommendation)",
                    "Physical gold (coins and small bars)",
                    "Gold ETFs (for liquidity)",
                    "Digital gold for small amounts",
                ],
                vec![
                    "Avoid gold mining stocks due to high volatility",
                    "Don't invest more than 15% of portfolio in gold",
                    "Consider rupee cost averaging through SIPs",
                    "Keep emergency fund separate from gold investments",
                ],
                15,
                "Long-term (5+ years)",
            )
        } else if score <= 11 {
            (
                RiskLevel::Medium,
                "Balanced Investor - You seek growth with moderate risk tolerance and can handle some volatility.",
                vec![
                    "Gold ETFs (primary vehicle)",
                    "Sovereign Gold Bonds (for stability)",
                    "Physical gold (moderate allocation)",
                    "Gold mining stocks (small allocation)",
                    "International gold funds",
                ],
                vec![
                    "Limit mining stocks to 10% of gold allocation",
                    "Rebalance portfolio quarterly",
                    "Monitor gold-to-equity ratio in portfolio",
                    "Be prepared for 20-30% volatility in mining stocks",
                ],
                20,
                "Medium to long-term (3-7 years)",
            )
        } else {
            (
                RiskLevel::High,
                "Aggressive Investor - You seek maximum returns and can tolerate high volatility for potential gains.",
                vec![
                    "Gold mining stocks (primary for leverage)",
                    "Gold ETFs (for active trading)",
                    "International gold mining funds",
                    "Gold futures and options (if experienced)",
                    "Thematic gold funds",
                ],
                vec![
                    "Mining stocks can lose 50%+ in bear markets",
                    "Requires active monitoring and management",
                    "Consider global diversification in mining stocks",
                    "Maintain some physical gold for stability",
                    "Don't exceed 25% total portfolio in gold",
                ],
                25,
                "Flexible (1-5 years with active management)",
            )
        };

        let data = json!({
            "risk_level": risk_level.as_str(),
            "score": score,
            "profile": profile,
            "suitable_investments": suitable,
            "warnings_and_recommendations": warnings,
            "max_gold_allocation": max_allocation,
            "investment_horizon": horizon,
        });
        ToolReply::ok(
            data,
            format!(
                "Risk assessment complete: {} risk profile (Score: {score}/15)",
                risk_level.as_str().to_uppercase()
            ),
        )
    }
}

/// `indian_tax_implications`
pub struct TaxImplicationsTool {
    definition: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct TaxImplicationsArgs {
    #[serde(rename = "investmentType")]
    investment_type: Option<String>,
}

fn tax_table() -> Vec<Value> {
    vec![
        json!({
            "investment_type": "Physical Gold",
            "short_term_tax": "Added to income, taxed as per income tax slab (30%+ for high earners)",
            "long_term_tax": "20% with indexation benefit (after 3 years holding)",
            "holding_period": "3 years for long-term capital gains qualification",
            "tax_benefits": [
                "Indexation benefit reduces tax burden significantly",
                "No tax on holding, only on sale",
                "Can be gifted to family members without tax (within limits)"
            ],
            "gst_implications": "3% GST on purchase (input tax credit not available to individuals)",
            "import_duty_info": "12.5% basic customs duty + 2.5% agriculture infrastructure cess = 15% total"
        }),
        json!({
            "investment_type": "Gold ETF",
            "short_term_tax": "15% if held less than 3 years",
            "long_term_tax": "20% with indexation benefit (after 3 years)",
            "holding_period": "3 years for long-term qualification",
            "tax_benefits": [
                "More tax-efficient than physical gold",
                "No GST on purchase/sale",
                "Indexation benefit available",
                "Can be used for tax-loss harvesting"
            ],
            "gst_implications": "No GST applicable",
            "import_duty_info": "Not applicable (paper gold)"
        }),
        json!({
            "investment_type": "Sovereign Gold Bonds",
            "short_term_tax": "Interest taxed as per income tax slab annually",
            "long_term_tax": "Capital gains completely tax-free if held till maturity (8 years)",
            "holding_period": "8 years for complete tax exemption",
            "tax_benefits": [
                "Interest income: 2.5% annually (taxable)",
                "Capital gains tax-free at maturity",
                "TDS applicable if interest > ₹5,000 per year",
                "Most tax-efficient gold investment"
            ],
            "gst_implications": "No GST applicable",
            "import_duty_info": "Not applicable (government security)"
        }),
        json!({
            "investment_type": "Gold Mining Stocks",
            "short_term_tax": "15% if held less than 1 year",
            "long_term_tax": "10% without indexation (after 1 year, if gains > ₹1 lakh)",
            "holding_period": "1 year for long-term qualification",
            "tax_benefits": [
                "Dividend income taxed as per slab",
                "STT (Securities Transaction Tax) applicable",
                "Can offset against other capital losses",
                "Lower holding period requirement"
            ],
            "gst_implications": "Not applicable",
            "import_duty_info": "Not applicable"
        }),
        json!({
            "investment_type": "Digital Gold",
            "short_term_tax": "Added to income, taxed as per slab (treated like physical gold)",
            "long_term_tax": "20% with indexation (after 3 years)",
            "holding_period": "3 years for long-term qualification",
            "tax_benefits": [
                "Same as physical gold taxation",
                "No GST on purchase through approved platforms",
                "Storage and insurance costs may be deductible"
            ],
            "gst_implications": "3% GST may apply depending on platform",
            "import_duty_info": "Underlying gold subject to import duty"
        }),
    ]
}

impl TaxImplicationsTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "indian_tax_implications".into(),
                description:
                    "Provide detailed information about Indian tax implications of gold investments"
                        .into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "investmentType": {
                            "type": "string",
                            "enum": [
                                "physical_gold",
                                "gold_etf",
                                "sovereign_bonds",
                                "gold_mining_stocks",
                                "digital_gold"
                            ],
                            "description": "Specific type of gold investment (optional, shows all if not specified)"
                        }
                    },
                    "required": []
                }),
            },
        }
    }

    fn display_name(wire: &str) -> Option<&'static str> {
        match wire {
            "physical_gold" => Some("Physical Gold"),
            "gold_etf" => Some("Gold ETF"),
            "sovereign_bonds" => Some("Sovereign Gold Bonds"),
            "gold_mining_stocks" => Some("Gold Mining Stocks"),
            "digital_gold" => Some("Digital Gold"),
            _ => None,
        }
    }
}

#[async_trait]
impl Tool for TaxImplicationsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, arguments: Value) -> ToolReply {
        let args: TaxImplicationsArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        let mut table = tax_table();
        if let Some(wire) = args.investment_type.as_deref() {
            let target = Self::display_name(wire);
            table.retain(|entry| entry["investment_type"].as_str() == target);
        }

        let message = match args.investment_type.as_deref() {
            Some(wire) => format!("Tax implications for {}", wire.replace('_', " ")),
            None => "Complete tax guide for all gold investments".to_string(),
        };
        ToolReply::ok(Value::Array(table), message)
    }
}

/// `sip_gold_planning`
pub struct SipPlanningTool {
    definition: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct SipPlanningArgs {
    #[serde(rename = "riskLevel")]
    risk_level: RiskLevel,
    #[serde(rename = "monthlyAmount")]
    monthly_amount: f64,
    duration: f64,
    #[serde(rename = "startDate")]
    #[allow(dead_code)]
    start_date: Option<String>,
}

impl SipPlanningTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "sip_gold_planning".into(),
                description: "Set up systematic investment plans for gold in India".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "riskLevel": {
                            "type": "string",
                            "enum": ["low", "medium", "high"],
                            "description": "Risk tolerance level"
                        },
                        "monthlyAmount": {
                            "type": "number",
                            "description": "Monthly SIP amount in INR"
                        },
                        "duration": {
                            "type": "number",
                            "description": "SIP duration in months"
                        },
                        "startDate": {
                            "type": "string",
                            "description": "Preferred start date (YYYY-MM-DD format, optional)"
                        }
                    },
                    "required": ["riskLevel", "monthlyAmount", "duration"]
                }),
            },
        }
    }
}

#[async_trait]
impl Tool for SipPlanningTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, arguments: Value) -> ToolReply {
        let args: SipPlanningArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        let (mix, platforms, schedule, exit_strategy) = match args.risk_level {
            RiskLevel::Low => (
                json!({ "digital_gold": 40, "gold_etf": 30, "sovereign_bonds": 30 }),
                vec![
                    "Paytm Gold (Digital Gold)",
                    "SBI Gold ETF via SBI Securities",
                    "Sovereign Gold Bonds via bank/post office",
                    "HDFC Securities (ETF trading)",
                    "Zerodha Coin (Mutual fund platform)",
                ],
                "5th of every month (post-salary date)",
                "Staggered exit over 6 months to average selling prices",
            ),
            RiskLevel::Medium => (
                json!({ "digital_gold": 25, "gold_etf": 50, "sovereign_bonds": 25 }),
                vec![
                    "Groww (ETF and Digital Gold)",
                    "Upstox (Low brokerage ETF trading)",
                    "PhonePe Gold (Digital gold)",
                    "ICICI Direct (Comprehensive platform)",
                    "Angel Broking (Research and execution)",
                ],
                "1st and 15th of month (bi-monthly for better averaging)",
                "Tactical exits based on gold cycle analysis",
            ),
            RiskLevel::High => (
                json!({ "digital_gold": 15, "gold_etf": 70, "sovereign_bonds": 15 }),
                vec![
                    "Zerodha (Low cost, advanced tools)",
                    "Kite by Zerodha (Mobile trading)",
                    "Fyers (Professional platform)",
                    "5paisa (Comprehensive services)",
                    "Interactive Brokers (International exposure)",
                ],
                "Weekly SIPs for maximum rupee cost averaging",
                "Active management with stop-losses and profit booking",
            ),
        };

        let total_invested = args.monthly_amount * args.duration;
        let years = args.duration / 12.0;
        let expected_accumulation = total_invested * 1.1_f64.powf(years);

        let data = json!({
            "risk_level": args.risk_level.as_str(),
            "monthly_amount": args.monthly_amount,
            "duration": args.duration,
            "investment_mix": mix,
            "expected_accumulation": expected_accumulation.round(),
            "platforms": platforms,
            "auto_investment_schedule": schedule,
            "exit_strategy": exit_strategy,
        });
        ToolReply::ok(
            data,
            format!(
                "SIP plan created: ₹{}/month for {} months (Total: ₹{})",
                inr(args.monthly_amount),
                args.duration,
                inr(total_invested)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plan_caps_sip_by_income_share() {
        let tool = InvestmentPlanTool::new();
        let reply = tool
            .call(json!({
                "riskLevel": "medium",
                "investmentAmount": 1200000,
                "timeHorizon": 5,
                "monthlyIncome": 100000
            }))
            .await;
        assert!(reply.success);
        // 1,200,000 over 60 months is 20,000 but income caps it at 15,000.
        assert_eq!(reply.data["monthly_investment"], 15_000.0);
        assert_eq!(reply.data["allocation"]["gold_mining_stocks"], 10);
    }

    #[tokio::test]
    async fn plan_rejects_unknown_risk_level() {
        let tool = InvestmentPlanTool::new();
        let reply = tool
            .call(json!({
                "riskLevel": "extreme",
                "investmentAmount": 100000,
                "timeHorizon": 3
            }))
            .await;
        assert!(!reply.success);
    }

    #[tokio::test]
    async fn allocation_flags_overexposure() {
        let tool = PortfolioAllocationTool::new();
        let reply = tool
            .call(json!({
                "riskLevel": "low",
                "totalPortfolioValue": 1000000,
                "currentGoldHolding": 300000
            }))
            .await;
        assert!(reply.success);
        assert!(reply.message.expect("message").contains("over-allocated at 30.0%"));
        assert_eq!(reply.data["gold_percentage"], 15.0);
        assert_eq!(reply.data["gold_allocation"]["amount"], 150_000.0);
    }

    #[tokio::test]
    async fn allocation_accepts_band_around_target() {
        let tool = PortfolioAllocationTool::new();
        let reply = tool
            .call(json!({
                "riskLevel": "medium",
                "totalPortfolioValue": 1000000,
                "currentGoldHolding": 220000
            }))
            .await;
        assert!(reply.success);
        assert!(reply.message.expect("message").contains("is optimal"));
    }

    #[tokio::test]
    async fn risk_scoring_hits_low_and_high_bands() {
        let tool = RiskAssessmentTool::new();

        let low = tool
            .call(json!({
                "age": 65,
                "monthlyIncome": 30000,
                "investmentExperience": "beginner",
                "investmentGoal": "wealth_preservation",
                "liquidityNeeds": "high"
            }))
            .await;
        assert!(low.success);
        assert_eq!(low.data["risk_level"], "low");
        assert_eq!(low.data["score"], 3);
        assert_eq!(low.data["max_gold_allocation"], 15);

        let high = tool
            .call(json!({
                "age": 28,
                "monthlyIncome": 250000,
                "investmentExperience": "experienced",
                "investmentGoal": "speculation",
                "liquidityNeeds": "low"
            }))
            .await;
        assert!(high.success);
        assert_eq!(high.data["risk_level"], "high");
        assert_eq!(high.data["score"], 15);
        assert!(
            high.message
                .expect("message")
                .contains("HIGH risk profile (Score: 15/15)")
        );
    }

    #[tokio::test]
    async fn risk_scoring_middle_band_is_medium() {
        let tool = RiskAssessmentTool::new();
        let reply = tool
            .call(json!({
                "age": 40,
                "monthlyIncome": 120000,
                "investmentExperience": "intermediate",
                "investmentGoal": "growth",
                "liquidityNeeds": "medium"
            }))
            .await;
        assert!(reply.success);
        // 2 + 2 + 2 + 2 + 2 = 10.
        assert_eq!(reply.data["score"], 10);
        assert_eq!(reply.data["risk_level"], "medium");
    }

    #[tokio::test]
    async fn tax_table_filters_by_type() {
        let tool = TaxImplicationsTool::new();
        let reply = tool
            .call(json!({ "investmentType": "sovereign_bonds" }))
            .await;
        assert!(reply.success);
        let rows = reply.data.as_array().expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["investment_type"], "Sovereign Gold Bonds");

        let all = tool.call(json!({})).await;
        assert_eq!(all.data.as_array().expect("rows").len(), 5);
    }

    #[tokio::test]
    async fn sip_plan_compounds_expected_accumulation() {
        let tool = SipPlanningTool::new();
        let reply = tool
            .call(json!({
                "riskLevel": "high",
                "monthlyAmount": 5000,
                "duration": 24
            }))
            .await;
        assert!(reply.success);
        // 120,000 invested, compounded at 10% over 2 years.
        assert_eq!(reply.data["expected_accumulation"], 145_200.0);
        assert_eq!(reply.data["investment_mix"]["gold_etf"], 70);
        assert!(
            reply
                .message
                .expect("message")
                .contains("₹5,000/month for 24 months (Total: ₹120,000)")
        );
    }
}

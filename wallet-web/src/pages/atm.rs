//! ATM Page - account, balance, deposit/withdraw and the two planners

use leptos::prelude::*;
use lib_utils::parse_date;
use shared::{
    truncate_address, Compounding, InvestmentType, MemoOutcome, ReturnEstimate, ReturnEstimateRequest,
    SavingsPlan, SavingsPlanRequest, SessionStatus,
};
use web_sys::SubmitEvent;

use crate::state::atm::use_atm_context;
use crate::utils::format::{format_balance, format_eth};

/// Empty or malformed input becomes NaN, which the planners reject.
fn parse_amount(value: &str) -> f64 {
    value.trim().parse().unwrap_or(f64::NAN)
}

#[component]
pub fn AtmPage() -> impl IntoView {
    let ctx = use_atm_context();
    let status = move || ctx.view.with(|v| v.status);

    view! {
        <div class="app-container" style="display: flex; justify-content: center; padding: 48px 24px;">
            <div class="card atm-card">
                <h1 class="card-title" style="text-align: center;">"Welcome to the Metacrafters ATM!"</h1>
                {move || match status() {
                    SessionStatus::NoProvider => view! {
                        <p class="status-message">"Please install MetaMask in order to use this ATM."</p>
                    }.into_any(),
                    SessionStatus::Disconnected | SessionStatus::Connecting => view! { <ConnectButton/> }.into_any(),
                    SessionStatus::Connected => view! {
                        <AccountPanel/>
                        <SavingsPlanner/>
                        <ReturnCalculator/>
                        <MemoStatus/>
                    }.into_any(),
                }}
                <ErrorBanner/>
            </div>
        </div>
    }
}

#[component]
fn ConnectButton() -> impl IntoView {
    let ctx = use_atm_context();
    let connecting = move || ctx.view.with(|v| v.status == SessionStatus::Connecting);

    let connect = move |_| {
        ctx.run(|client| async move {
            if let Err(e) = client.connect().await {
                log::warn!("Connect failed: {}", e);
            }
        });
    };

    view! {
        <button class="btn" on:click=connect disabled=connecting>
            {move || if connecting() { "Connecting..." } else { "Please connect your MetaMask wallet" }}
        </button>
    }
}

#[component]
fn AccountPanel() -> impl IntoView {
    let ctx = use_atm_context();
    let amount = ctx.client().config().fixed_amount;

    let account = move || ctx.view.with(|v| v.account.clone().unwrap_or_default());
    let balance = move || ctx.view.with(|v| format_balance(&v.balance));
    let busy = move || ctx.view.with(|v| v.is_busy());
    let pending = move || {
        ctx.view.with(|v| {
            v.pending.as_ref().map(|p| match &p.hash {
                Some(hash) => format!("Waiting for {} {} to confirm...", p.kind.label(), truncate_address(hash)),
                None => format!("Confirm the {} in your wallet...", p.kind.label()),
            })
        })
    };

    let deposit = move |_| {
        ctx.run(|client| async move {
            if let Err(e) = client.deposit().await {
                log::warn!("Deposit failed: {}", e);
            }
        });
    };
    let withdraw = move |_| {
        ctx.run(|client| async move {
            if let Err(e) = client.withdraw().await {
                log::warn!("Withdraw failed: {}", e);
            }
        });
    };

    view! {
        <div class="atm-account">
            <p>"Your Account: " <span title=account>{move || truncate_address(&account())}</span></p>
            <p>"Your Balance: " {balance}</p>
            <button class="btn" on:click=deposit disabled=busy>{format!("Deposit {} ETH", amount)}</button>
            <button class="btn" on:click=withdraw disabled=busy>{format!("Withdraw {} ETH", amount)}</button>
            {move || pending().map(|text| view! { <p class="pending-tx">{text}</p> })}
        </div>
    }
}

fn savings_sentence(plan: &SavingsPlan) -> String {
    if plan.goal_reached() {
        format!("Your current balance already covers this goal by {}.", plan.target_date)
    } else {
        format!(
            "You need to save approximately {} per month to reach your goal by {}.",
            format_eth(plan.monthly_amount),
            plan.target_date
        )
    }
}

#[component]
fn SavingsPlanner() -> impl IntoView {
    let ctx = use_atm_context();
    let goal = RwSignal::new(String::new());
    let current = RwSignal::new("0".to_string());
    let target = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = SavingsPlanRequest {
            goal: parse_amount(&goal.get_untracked()),
            current_balance: parse_amount(&current.get_untracked()),
            target_date: parse_date(target.get_untracked().trim()).ok(),
        };
        ctx.run(move |client| async move {
            if let Err(e) = client.compute_savings(&request).await {
                log::warn!("Savings plan rejected: {}", e);
            }
        });
    };

    let result = move || ctx.view.with(|v| v.savings.as_ref().map(savings_sentence));

    view! {
        <div class="investment-planner">
            <h2>"Investment Planner"</h2>
            <form on:submit=on_submit>
                <label>
                    "Target Investment Goal (ETH): "
                    <input type="number" step="any" prop:value=move || goal.get()
                        on:input=move |ev| goal.set(event_target_value(&ev))/>
                </label>
                <label>
                    "Current Balance (ETH): "
                    <input type="number" step="any" prop:value=move || current.get()
                        on:input=move |ev| current.set(event_target_value(&ev))/>
                </label>
                <label>
                    "Target Date: "
                    <input type="date" prop:value=move || target.get()
                        on:input=move |ev| target.set(event_target_value(&ev))/>
                </label>
                <button type="submit" class="btn">"Calculate Monthly Savings"</button>
            </form>
            {move || result().map(|text| view! { <p class="planner-result">{text}</p> })}
        </div>
    }
}

fn return_sentence(estimate: &ReturnEstimate) -> String {
    format!(
        "Your investment return will be approximately {} ({}% over {} {}).",
        format_eth(estimate.projected_value),
        estimate.rate_percent,
        estimate.periods,
        estimate.compounding.period_unit()
    )
}

#[component]
fn ReturnCalculator() -> impl IntoView {
    let ctx = use_atm_context();
    let kind = RwSignal::new(InvestmentType::EquityFunds.label().to_string());
    let amount = RwSignal::new(String::new());
    let periods = RwSignal::new(String::new());
    let rate = RwSignal::new(String::new());

    let selected = move || kind.with(|k| k.parse::<InvestmentType>().ok());
    let needs_rate = move || selected().map(|k| k.requires_rate()).unwrap_or(false);
    let period_label = move || match selected().map(|k| k.compounding()) {
        Some(Compounding::Monthly) => "Duration (months): ",
        _ => "Time Period (years): ",
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = ReturnEstimateRequest {
            investment_type: kind.get_untracked(),
            amount: parse_amount(&amount.get_untracked()),
            periods: periods.get_untracked().trim().parse().unwrap_or(0),
            rate: rate.get_untracked().trim().parse().ok(),
        };
        ctx.run(move |client| async move {
            if let Err(e) = client.compute_return(&request).await {
                log::warn!("Return estimate rejected: {}", e);
            }
        });
    };

    let result = move || ctx.view.with(|v| v.estimate.as_ref().map(return_sentence));

    view! {
        <div class="investment-return-calculator">
            <h2>"Investment Return Calculator"</h2>
            <form on:submit=on_submit>
                <label>
                    "Investment Type: "
                    <select prop:value=move || kind.get() on:change=move |ev| kind.set(event_target_value(&ev))>
                        {InvestmentType::ALL
                            .iter()
                            .map(|t| view! { <option value=t.label()>{t.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Investment Amount (ETH): "
                    <input type="number" step="any" prop:value=move || amount.get()
                        on:input=move |ev| amount.set(event_target_value(&ev))/>
                </label>
                <label>
                    {period_label}
                    <input type="number" min="0" step="1" prop:value=move || periods.get()
                        on:input=move |ev| periods.set(event_target_value(&ev))/>
                </label>
                <Show when=needs_rate>
                    <label>
                        "Desired Interest Rate (%): "
                        <input type="number" step="any" prop:value=move || rate.get()
                            on:input=move |ev| rate.set(event_target_value(&ev))/>
                    </label>
                </Show>
                <button type="submit" class="btn">"Calculate Return"</button>
            </form>
            {move || result().map(|text| view! { <p class="planner-result">{text}</p> })}
        </div>
    }
}

#[component]
fn MemoStatus() -> impl IntoView {
    let ctx = use_atm_context();

    move || {
        ctx.view.with(|v| v.memo.clone()).map(|memo| {
            let text = match &memo.outcome {
                MemoOutcome::Pending => format!("Recording \"{}\" on-chain...", memo.message),
                MemoOutcome::Recorded { hash } => {
                    format!("Recorded \"{}\" in {}", memo.message, truncate_address(hash))
                }
                MemoOutcome::Failed { reason } => {
                    format!("Could not record \"{}\": {}", memo.message, reason)
                }
            };
            view! { <p class="memo-status">{text}</p> }
        })
    }
}

#[component]
fn ErrorBanner() -> impl IntoView {
    let ctx = use_atm_context();

    move || {
        ctx.view
            .with(|v| v.last_error.clone())
            .map(|error| view! { <p class="error-message">{error}</p> })
    }
}

//! About Page

use leptos::prelude::*;
use lib_core::planner::FIXED_FUND_RATE_PERCENT;

use crate::state::atm::use_atm_context;

#[component]
pub fn AboutPage() -> impl IntoView {
    let ctx = use_atm_context();
    let config = ctx.client().config().clone();

    view! {
        <div class="app-container" style="display: flex; flex-direction: column; min-height: calc(100vh - 60px);">
            <div style="flex: 1; display: flex; justify-content: center; align-items: center; padding: 48px 24px;">
                <div class="about-container">
                    <div class="card">
                        <h1 class="card-title" style="text-align: center; margin-bottom: 32px;">
                            "About the ATM"
                        </h1>

                        <div style="line-height: 1.8; font-size: 16px;">
                            <p style="margin-bottom: 24px;">
                                "A browser front end for a deployed ATM contract. Connect MetaMask, move a fixed
                                amount in or out of the contract, and plan savings or estimate investment returns.
                                Planner results are recorded on-chain as a small self-addressed transaction."
                            </p>

                            <h2 style="font-size: 24px; margin-top: 32px; margin-bottom: 16px; font-weight: 600;">
                                "Planners"
                            </h2>
                            <ul style="margin-left: 24px; margin-bottom: 24px;">
                                <li style="margin-bottom: 8px;">
                                    "Monthly savings: remaining amount divided by whole months (30.44 days) until the target date"
                                </li>
                                <li style="margin-bottom: 8px;">
                                    {format!("Equity and mutual funds compound at a fixed {}% (mutual funds monthly)", FIXED_FUND_RATE_PERCENT)}
                                </li>
                                <li style="margin-bottom: 8px;">"Stocks and gold compound annually at the rate you enter"</li>
                            </ul>

                            <h2 style="font-size: 24px; margin-top: 32px; margin-bottom: 16px; font-weight: 600;">
                                "Contract"
                            </h2>
                            <p style="margin-bottom: 8px; word-break: break-all;">{config.contract_address}</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

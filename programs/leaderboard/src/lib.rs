use anchor_lang::prelude::*;

pub mod events;
pub mod instructions;
pub mod states;

pub use instructions::*;

declare_id!("5CDN26U5Tct3tFAph9jr15s57WGAzLFWFkc7aLAY1APx");

#[program]
pub mod hiscore_leaderboard {
    use super::*;

    pub fn initialize_leaderboard(ctx: Context<InitializeLeaderboard>) -> Result<()> {
        instructions::init_leaderboard_handler(ctx)
    }

    /// Submit a score. The signer is the owner of the score.
    pub fn submit_score(ctx: Context<SubmitScore>, value: u64) -> Result<()> {
        SubmitScore::invoke(ctx, value)
    }

    /// Set the signer's display name. Names are permanent once set.
    pub fn set_display_name(ctx: Context<SetDisplayName>, name: String) -> Result<()> {
        SetDisplayName::invoke(ctx, name)
    }
}

use crate::states::Leaderboard;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeLeaderboard<'info> {
    #[account(init, payer = authority, space = 8 + Leaderboard::INIT_SPACE)]
    pub leaderboard: Account<'info, Leaderboard>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn init_leaderboard_handler(ctx: Context<InitializeLeaderboard>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let leaderboard = &mut ctx.accounts.leaderboard;
    leaderboard.init(authority);
    msg!(
        "leaderboard: initialized={} authority={}",
        leaderboard.key(),
        leaderboard.authority
    );
    Ok(())
}

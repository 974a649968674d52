use anchor_lang::prelude::*;
use hiscore_model::{RankedLedger, RankedLedgerExt, SubmitOutcome};

use crate::{
    events::{ScoreRemoved, ScoreSubmitted},
    states::{Leaderboard, LeaderboardError},
};

/// The accounts definition for [`submit_score`](crate::hiscore_leaderboard::submit_score).
#[derive(Accounts)]
pub struct SubmitScore<'info> {
    /// The owner of the score.
    pub owner: Signer<'info>,
    /// The leaderboard to rank the score on.
    #[account(mut)]
    pub leaderboard: Account<'info, Leaderboard>,
}

impl<'info> SubmitScore<'info> {
    pub(crate) fn invoke(ctx: Context<Self>, value: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let owner = ctx.accounts.owner.key();
        let leaderboard_key = ctx.accounts.leaderboard.key();

        let events = record_score(
            &mut ctx.accounts.leaderboard,
            leaderboard_key,
            owner,
            value,
            now,
        )?;

        if let Some(event) = events.removed {
            emit!(event);
        }
        if let Some(event) = events.submitted {
            emit!(event);
        }
        Ok(())
    }
}

/// Events of a score submission, in emission order.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ScoreEvents {
    pub(crate) removed: Option<ScoreRemoved>,
    pub(crate) submitted: Option<ScoreSubmitted>,
}

/// Rank `value` for `owner` and return the events to emit.
pub(crate) fn record_score(
    leaderboard: &mut Leaderboard,
    leaderboard_key: Pubkey,
    owner: Pubkey,
    value: u64,
    now: i64,
) -> Result<ScoreEvents> {
    let outcome = leaderboard.submit(&owner, value, now).map_err(|err| {
        msg!("leaderboard: {}", err);
        let code = LeaderboardError::from(err);
        error!(code)
    })?;

    let SubmitOutcome::Recorded { replaced, evicted } = outcome else {
        msg!(
            "leaderboard: ignored owner={} value={} best={}",
            owner,
            value,
            leaderboard.best_of(&owner)
        );
        return Ok(ScoreEvents::default());
    };

    if let Some(evicted) = evicted {
        msg!(
            "leaderboard: evicted owner={} value={}",
            evicted.owner,
            evicted.value
        );
    }

    debug_assert!(leaderboard.check_invariants().is_ok());

    msg!(
        "leaderboard: owner={} value={} rank={:?}",
        owner,
        value,
        leaderboard.rank_of(&owner)
    );
    Ok(ScoreEvents {
        removed: replaced.map(|_| ScoreRemoved {
            leaderboard: leaderboard_key,
            owner,
        }),
        submitted: Some(ScoreSubmitted {
            leaderboard: leaderboard_key,
            owner,
            value,
        }),
    })
}

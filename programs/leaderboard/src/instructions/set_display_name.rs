use anchor_lang::prelude::*;
use hiscore_model::{validate_display_name, NameRegistryExt};

use crate::{
    events::NameSet,
    states::{
        name_seed, Leaderboard, LeaderboardError, NameRecord, Profile, ProfileBinding,
        MAX_NAME_LEN, NAME_SEED, PROFILE_SEED,
    },
};

/// The accounts definition for [`set_display_name`](crate::hiscore_leaderboard::set_display_name).
#[derive(Accounts)]
#[instruction(name: String)]
pub struct SetDisplayName<'info> {
    /// The owner to name. Pays for the profile and the name record.
    #[account(
        mut,
        constraint = validate_display_name(&name, MAX_NAME_LEN.into()).is_ok()
            @ LeaderboardError::InvalidName,
    )]
    pub owner: Signer<'info>,
    /// The leaderboard the name is registered for.
    pub leaderboard: Account<'info, Leaderboard>,
    /// The profile of the owner (created on demand).
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + Profile::INIT_SPACE,
        seeds = [PROFILE_SEED, leaderboard.key().as_ref(), owner.key().as_ref()],
        bump,
    )]
    pub profile: Account<'info, Profile>,
    /// The reverse record of the name (created on demand).
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + NameRecord::INIT_SPACE,
        seeds = [NAME_SEED, leaderboard.key().as_ref(), name_seed(&name).as_ref()],
        bump,
    )]
    pub name_record: Account<'info, NameRecord>,
    /// System program.
    pub system_program: Program<'info, System>,
}

impl<'info> SetDisplayName<'info> {
    pub(crate) fn invoke(ctx: Context<Self>, name: String) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        let leaderboard = ctx.accounts.leaderboard.key();

        let event = bind_display_name(
            leaderboard,
            owner,
            (&mut *ctx.accounts.profile, ctx.bumps.profile),
            (&mut *ctx.accounts.name_record, ctx.bumps.name_record),
            &name,
        )?;

        if let Some(event) = event {
            emit!(event);
        }
        Ok(())
    }
}

/// Bind `name` to `owner` through its profile and the name record, and return
/// the event to emit if a new binding was created.
pub(crate) fn bind_display_name(
    leaderboard: Pubkey,
    owner: Pubkey,
    (profile, profile_bump): (&mut Profile, u8),
    (record, record_bump): (&mut NameRecord, u8),
    name: &str,
) -> Result<Option<NameSet>> {
    // First-time init fields.
    if profile.leaderboard == Pubkey::default() {
        profile.bump = profile_bump;
        profile.leaderboard = leaderboard;
        profile.owner = owner;
    }
    require_keys_eq!(profile.owner, owner, LeaderboardError::InvalidOwner);

    if record.leaderboard == Pubkey::default() {
        record.bump = record_bump;
        record.leaderboard = leaderboard;
    }

    let binding = ProfileBinding::new(profile, record)
        .set_display_name(&owner, name)
        .map_err(|err| {
            msg!("leaderboard: {}", err);
            let code = LeaderboardError::from(err);
            error!(code)
        })?;

    if !binding.is_bound() {
        msg!(
            "leaderboard: name unchanged owner={} name={} reason={:?}",
            owner,
            name,
            binding
        );
        return Ok(None);
    }

    msg!("leaderboard: owner={} name={}", owner, name);
    Ok(Some(NameSet {
        leaderboard,
        owner,
        name: name.to_owned(),
    }))
}

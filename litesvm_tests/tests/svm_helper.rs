use anchor_lang::{AnchorDeserialize, Discriminator, InstructionData, ToAccountMetas};
use base64::{engine::general_purpose::STANDARD, Engine};
use litesvm::{
    types::{FailedTransactionMetadata, TransactionMetadata},
    LiteSVM,
};
use solana_sdk::{
    clock::Clock,
    instruction::{Instruction, InstructionError},
    message::{v0::Message, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program,
    transaction::{TransactionError, VersionedTransaction},
};

use hiscore_leaderboard::{
    accounts, instruction,
    states::{find_name_record_address, find_profile_address, LeaderboardError},
    ID as PROGRAM_ID,
};

/// Built with `anchor build` (or `cargo build-sbf`) at the workspace root.
pub const PROGRAM_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../target/deploy/hiscore_leaderboard.so"
);

pub fn setup() -> LiteSVM {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(&PROGRAM_ID, PROGRAM_PATH)
        .expect("failed to load the leaderboard program, run `anchor build` first");
    svm
}

pub fn funded_keypair(svm: &mut LiteSVM) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), 10_000_000_000)
        .expect("failed to airdrop");
    keypair
}

pub fn set_unix_timestamp(svm: &mut LiteSVM, unix_timestamp: i64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp = unix_timestamp;
    svm.set_sysvar::<Clock>(&clock);
}

pub fn execute_transaction(
    svm: &mut LiteSVM,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<TransactionMetadata, FailedTransactionMetadata> {
    let payer = signers[0].pubkey();
    let message = Message::try_compile(&payer, instructions, &[], svm.latest_blockhash())
        .expect("failed to compile message");
    let tx = VersionedTransaction::try_new(VersionedMessage::V0(message), signers)
        .expect("failed to create transaction");
    let result = svm.send_transaction(tx);
    // Identical retries must not be deduplicated.
    svm.expire_blockhash();
    result
}

pub fn initialize_leaderboard(svm: &mut LiteSVM, authority: &Keypair) -> Pubkey {
    let leaderboard = Keypair::new();
    let ix = Instruction {
        program_id: PROGRAM_ID,
        accounts: accounts::InitializeLeaderboard {
            leaderboard: leaderboard.pubkey(),
            authority: authority.pubkey(),
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::InitializeLeaderboard {}.data(),
    };
    execute_transaction(svm, &[ix], &[authority, &leaderboard])
        .expect("failed to initialize leaderboard");
    leaderboard.pubkey()
}

pub fn submit_score_ix(leaderboard: &Pubkey, owner: &Pubkey, value: u64) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: accounts::SubmitScore {
            owner: *owner,
            leaderboard: *leaderboard,
        }
        .to_account_metas(None),
        data: instruction::SubmitScore { value }.data(),
    }
}

pub fn set_display_name_ix(leaderboard: &Pubkey, owner: &Pubkey, name: &str) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: accounts::SetDisplayName {
            owner: *owner,
            leaderboard: *leaderboard,
            profile: find_profile_address(leaderboard, owner).0,
            name_record: find_name_record_address(leaderboard, name).0,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::SetDisplayName {
            name: name.to_owned(),
        }
        .data(),
    }
}

pub fn fetch<T: anchor_lang::AccountDeserialize>(svm: &LiteSVM, address: &Pubkey) -> Option<T> {
    let account = svm.get_account(address)?;
    T::try_deserialize(&mut account.data.as_slice()).ok()
}

/// Decode the events of type `T` emitted in the transaction logs.
pub fn events<T: AnchorDeserialize + Discriminator>(meta: &TransactionMetadata) -> Vec<T> {
    meta.logs
        .iter()
        .filter_map(|log| log.strip_prefix("Program data: "))
        .filter_map(|data| STANDARD.decode(data).ok())
        .filter_map(|data| {
            let payload = data.strip_prefix(T::DISCRIMINATOR)?;
            T::try_from_slice(payload).ok()
        })
        .collect()
}

pub fn assert_leaderboard_error(failed: &FailedTransactionMetadata, expected: LeaderboardError) {
    assert_eq!(
        failed.err,
        TransactionError::InstructionError(0, InstructionError::Custom(u32::from(expected))),
        "logs: {:#?}",
        failed.meta.logs
    );
}

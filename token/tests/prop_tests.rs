use proptest::prelude::*;

use wlt_nullables::EventRecorder;
use wlt_token::{ErrorKind, Operation, TokenService};
use wlt_types::{Principal, TokenAmount, TokenMetadata};

const NAMES: [&str; 5] = ["owner", "minter", "alice", "bob", "carol"];

fn principal() -> impl Strategy<Value = Principal> {
    prop::sample::select(NAMES.to_vec()).prop_map(Principal::new)
}

fn amount() -> impl Strategy<Value = TokenAmount> {
    (0u128..500).prop_map(TokenAmount::new)
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        principal().prop_map(|account| Operation::AddKycListed { account }),
        principal().prop_map(|account| Operation::RemoveKycListed { account }),
        principal().prop_map(|account| Operation::AddMinter { account }),
        (principal(), amount()).prop_map(|(to, amount)| Operation::Mint { to, amount }),
        (principal(), amount())
            .prop_map(|(investor, amount)| Operation::ApproveAndMint { investor, amount }),
        Just(Operation::FinishMinting),
        Just(Operation::Pause),
        Just(Operation::Unpause),
        (principal(), amount()).prop_map(|(to, amount)| Operation::Transfer { to, amount }),
        (principal(), principal(), amount())
            .prop_map(|(from, to, amount)| Operation::TransferFrom { from, to, amount }),
        (principal(), amount())
            .prop_map(|(spender, amount)| Operation::IncreaseAllowance { spender, amount }),
        amount().prop_map(|amount| Operation::Burn { amount }),
        (principal(), amount()).prop_map(|(from, amount)| Operation::BurnFrom { from, amount }),
        (principal(), principal()).prop_map(|(from, to)| Operation::RestoreTokens { from, to }),
    ]
}

fn steps() -> impl Strategy<Value = Vec<(Principal, Operation)>> {
    prop::collection::vec((principal(), operation()), 0..64)
}

fn token() -> TokenService {
    TokenService::new(Principal::new("owner"), TokenMetadata::default())
}

proptest! {
    /// Total supply always equals the sum of balances.
    #[test]
    fn supply_stays_consistent(steps in steps()) {
        let mut token = token();
        for (caller, op) in &steps {
            let _ = token.apply(caller, op);
            prop_assert!(token.supply_is_consistent());
        }
    }

    /// Once minting is finished no caller can mint again.
    #[test]
    fn mint_after_finish_always_fails(
        steps in steps(),
        caller in principal(),
        to in principal(),
        raw in 0u128..500,
    ) {
        let mut token = token();
        for (c, op) in &steps {
            let _ = token.apply(c, op);
        }
        if !token.minting_finished() {
            token.finish_minting(&Principal::new("owner")).unwrap();
        }
        let supply = token.total_supply();
        let err = token.mint(&caller, &to, TokenAmount::new(raw)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MintingClosed);
        prop_assert_eq!(token.total_supply(), supply);
    }

    /// A rejected operation publishes nothing and changes no balance.
    #[test]
    fn rejections_are_side_effect_free(steps in steps()) {
        let mut token = token();
        let recorder = EventRecorder::new();
        token.subscribe(recorder.listener());

        for (caller, op) in &steps {
            let before = token.snapshot();
            let published = recorder.len();
            match token.apply(caller, op) {
                Ok(events) => prop_assert_eq!(recorder.len(), published + events.len()),
                Err(_) => {
                    let after = token.snapshot();
                    prop_assert_eq!(recorder.len(), published);
                    prop_assert_eq!(&after.ledger.digest, &before.ledger.digest);
                    prop_assert_eq!(after.phase, before.phase);
                    prop_assert_eq!(after.pause, before.pause);
                    prop_assert_eq!(&after.kyc_listed, &before.kyc_listed);
                    prop_assert_eq!(&after.minters, &before.minters);
                }
            }
        }
    }

    /// Transfers never change total supply.
    #[test]
    fn transfers_conserve_supply(
        from in principal(),
        to in principal(),
        raw in 0u128..1000,
    ) {
        let owner = Principal::new("owner");
        let mut token = token();
        for name in NAMES {
            let p = Principal::new(name);
            token.add_kyc_listed(&owner, &p).unwrap();
            token.mint(&owner, &p, TokenAmount::new(250)).unwrap();
        }
        token.finish_minting(&owner).unwrap();

        let supply = token.total_supply();
        let result = token.transfer(&from, &to, TokenAmount::new(raw));
        prop_assert_eq!(result.is_ok(), raw <= 250);
        prop_assert_eq!(token.total_supply(), supply);
    }
}

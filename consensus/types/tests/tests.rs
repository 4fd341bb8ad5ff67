use slog::{o, Logger};
use ssz::{Encode, SszKind, SszSchema, SszType};
use tree_hash::{Merkleizer, MerkleizerConfig, RingPairHasher, Sha2PairHasher, TreeHash};
use types::test_utils::{SeedableRng, TestRandom, XorShiftRng};
use types::*;

fn sequential() -> Merkleizer {
    let config = MerkleizerConfig {
        parallelization_threshold: 2,
        workers: Some(0),
    };
    Merkleizer::new(Sha2PairHasher, config, Logger::root(slog::Discard, o!()))
        .expect("valid config")
}

type Registry = VariableList<Validator, <MainnetEthSpec as EthSpec>::ValidatorRegistryLimit>;

fn validators(n: usize) -> Registry {
    let mut rng = XorShiftRng::from_seed([5; 16]);
    let list = (0..n)
        .map(|_| Validator::random_for_test(&mut rng))
        .collect::<Vec<_>>();
    VariableList::new(list).expect("within registry limit")
}

#[test]
fn registry_root_is_independent_of_workers() {
    // Above the default parallelization threshold, so the default merkleizer splits the work.
    let registry = validators(6_000);
    let limit = <MainnetEthSpec as EthSpec>::ValidatorRegistryLimit::to_usize();

    let merkleizer = sequential();
    let expected = merkleizer.mix_in_length(
        &merkleizer
            .vec_tree_hash_root(&registry, limit)
            .expect("should hash"),
        registry.len(),
    );

    assert_eq!(registry.tree_hash_root(), Ok(expected));
}

#[test]
fn alternative_hasher_agrees() {
    let registry = validators(64);
    let limit = <MainnetEthSpec as EthSpec>::ValidatorRegistryLimit::to_usize();
    let ring = Merkleizer::new(
        RingPairHasher,
        MerkleizerConfig::default(),
        Logger::root(slog::Discard, o!()),
    )
    .expect("valid config");

    let root = ring
        .vec_tree_hash_root(&registry, limit)
        .expect("should hash");
    assert_eq!(
        Ok(ring.mix_in_length(&root, registry.len())),
        registry.tree_hash_root()
    );
}

#[test]
fn state_schema() {
    let schema = BeaconState::<MainnetEthSpec>::ssz_schema();
    assert_eq!(schema.kind(), SszKind::Container);
    assert!(schema.is_variable_size());
    assert_eq!(schema.fixed_len(), None);

    match schema {
        SszType::Container { name, fields } => {
            assert_eq!(name, "BeaconState");
            assert_eq!(fields.len(), 22);
            assert_eq!(fields[0].0, "genesis_time");
            assert_eq!(fields[2].1, Slot::ssz_schema());
            assert!(fields[17].1.kind() == SszKind::Vector);
            assert!(!fields[20].1.is_variable_size());
        }
        other => panic!("expected a container, got {:?}", other),
    }
}

#[test]
fn fixed_size_types_agree_with_schema() {
    fn check<T: Encode + SszSchema>() {
        assert_eq!(T::ssz_schema().fixed_len(), Some(T::ssz_fixed_len()));
    }

    check::<Fork>();
    check::<ForkData>();
    check::<Checkpoint>();
    check::<Eth1Data>();
    check::<BeaconBlockHeader>();
    check::<SignedBeaconBlockHeader>();
    check::<Validator>();
    check::<DepositMessage>();
    check::<DepositData>();
    check::<Deposit>();
    check::<AttestationData>();
    check::<SigningData>();
}

#[test]
fn state_round_trip_through_checked_encoder() {
    let mut rng = XorShiftRng::from_seed([11; 16]);
    let state = BeaconState::<MinimalEthSpec>::random_for_test(&mut rng);

    let bytes = ssz::encode(&state).expect("should encode");
    assert_eq!(bytes.len(), state.ssz_bytes_len());
    assert_eq!(
        ssz::decode::<BeaconState<MinimalEthSpec>>(&bytes).as_ref(),
        Ok(&state)
    );

    // Truncation anywhere must be reported, not panic.
    for cut in [1, 4, 100] {
        assert!(ssz::decode::<BeaconState<MinimalEthSpec>>(&bytes[..cut]).is_err());
    }
}

#[test]
fn signing_root_of_header() {
    let spec = ChainSpec::mainnet();
    let header = BeaconBlockHeader {
        slot: Slot::new(4),
        proposer_index: 9,
        ..BeaconBlockHeader::default()
    };
    let fork = Fork::default();
    let genesis_validators_root = Hash256::repeat_byte(1);

    let domain = spec
        .get_domain(
            Epoch::new(0),
            Domain::BeaconProposer,
            &fork,
            genesis_validators_root,
        )
        .expect("should hash");
    let signing_root = header.signing_root(domain).expect("should hash");

    assert_eq!(
        signing_root,
        compute_signing_root(&header, domain).expect("should hash")
    );
    assert_ne!(
        signing_root,
        header
            .signing_root(spec.get_deposit_domain().expect("should hash"))
            .expect("should hash")
    );
}

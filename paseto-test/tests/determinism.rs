use paseto::{Purpose, Version};
use paseto_test::{V1_SEED, V2_SEED, parser_builder, token_builder};

#[test]
fn seeded_local_tokens_are_reproducible() {
    for (version, seed) in [(Version::V1, &V1_SEED[..]), (Version::V2, &V2_SEED[..])] {
        let build = |subject: &str, seed: &[u8]| {
            token_builder(version, Purpose::Local)
                .subject(subject)
                .footer("footer")
                .dangerous_compact_with_seed(seed)
                .unwrap()
        };

        assert_eq!(build("alice", seed), build("alice", seed));
        assert_ne!(build("alice", seed), build("bob", seed));
        assert_ne!(build("alice", seed), build("alice", &[0x33; 32][..seed.len()]));

        let parsed = parser_builder()
            .build()
            .unwrap()
            .parse(&build("alice", seed))
            .unwrap();
        assert_eq!(parsed.claims().subject().unwrap(), Some("alice"));
    }
}

#[test]
fn unseeded_local_tokens_differ() {
    for version in [Version::V1, Version::V2] {
        let a = token_builder(version, Purpose::Local).subject("alice").compact().unwrap();
        let b = token_builder(version, Purpose::Local).subject("alice").compact().unwrap();
        assert_ne!(a, b);
    }
}

#[test]
fn public_signatures() {
    let build = |version| {
        token_builder(version, Purpose::Public)
            .subject("alice")
            .compact()
            .unwrap()
    };

    // Ed25519 is deterministic, RSA-PSS uses a random salt
    assert_eq!(build(Version::V2), build(Version::V2));
    assert_ne!(build(Version::V1), build(Version::V1));
}

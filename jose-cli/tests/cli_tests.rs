use assert_matches::assert_matches;
use clap::Parser;
use jose_cli::commands::{algorithms, keys, signature, wrap};
use jose_cli::error::Error;
use jose_cli::{execute, load_config, Cli, Commands};
use jose_jwa::{AlgorithmRegistry, JwaConfig};
use std::io::Write;

fn registry() -> AlgorithmRegistry {
    let config = JwaConfig::new().with_pbes2_iteration_count(64);
    AlgorithmRegistry::with_defaults(&config).unwrap()
}

#[test]
fn test_parse_wrap_command() {
    let cli = Cli::try_parse_from([
        "jose-cli",
        "--format",
        "text",
        "wrap",
        "--alg",
        "PBES2-HS256+A128KW",
        "--password",
        "secret",
        "--cek-hex",
        "00112233445566778899aabbccddeeff",
    ])
    .unwrap();

    assert_eq!(cli.format, "text");
    assert_eq!(cli.command.name(), "wrap");
    assert_matches!(cli.command, Commands::Wrap { ref alg, .. } if alg == "PBES2-HS256+A128KW");
}

#[test]
fn test_algorithms_listing() {
    let response = algorithms::list(&registry());
    assert_eq!(response.key_encryption.len(), 3);
    assert_eq!(response.signature, vec!["ES256", "ES256K", "ES384", "ES512"]);
}

#[test]
fn test_wrap_unwrap_roundtrip() {
    let registry = registry();
    let cek_hex = "000102030405060708090a0b0c0d0e0f1011121314151617";

    let wrapped = wrap::wrap(&registry, "PBES2-HS384+A192KW", "hunter2", cek_hex).unwrap();
    assert_eq!(wrapped.header["alg"], "PBES2-HS384+A192KW");
    assert_eq!(wrapped.header["p2c"], 64);

    let header = serde_json::to_string(&wrapped.header).unwrap();
    let unwrapped = wrap::unwrap(
        &registry,
        "PBES2-HS384+A192KW",
        "hunter2",
        &header,
        &wrapped.encrypted_key,
    )
    .unwrap();
    assert_eq!(unwrapped.cek, cek_hex);
}

#[test]
fn test_unwrap_with_wrong_password_fails() {
    let registry = registry();
    let wrapped = wrap::wrap(
        &registry,
        "PBES2-HS256+A128KW",
        "right",
        "00112233445566778899aabbccddeeff",
    )
    .unwrap();
    let header = serde_json::to_string(&wrapped.header).unwrap();

    assert_matches!(
        wrap::unwrap(
            &registry,
            "PBES2-HS256+A128KW",
            "wrong",
            &header,
            &wrapped.encrypted_key
        ),
        Err(Error::Jwa(jose_jwa::Error::Cryptography(_)))
    );
}

#[test]
fn test_wrap_rejects_bad_input() {
    let registry = registry();
    assert_matches!(
        wrap::wrap(&registry, "PBES2-HS256+A128KW", "pw", "not hex"),
        Err(Error::Hex(_))
    );
    assert_matches!(
        wrap::wrap(&registry, "PBES2-HS256+A128KW", "", "00112233445566778899aabbccddeeff"),
        Err(Error::InvalidArgument(_))
    );
    assert_matches!(
        wrap::wrap(&registry, "A128KW", "pw", "00112233445566778899aabbccddeeff"),
        Err(Error::Jwa(jose_jwa::Error::UnsupportedAlgorithm(_)))
    );
}

#[test]
fn test_generate_sign_verify() {
    let registry = registry();
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("es384.json");

    let generated = keys::generate(&registry, "ES384", Some(&key_path)).unwrap();
    assert_eq!(generated.jwk["crv"], "P-384");
    assert!(generated.public_jwk.get("d").is_none());

    let signed = signature::sign(&registry, "ES384", &key_path, "hello").unwrap();
    let verified =
        signature::verify(&registry, "ES384", &key_path, "hello", &signed.signature).unwrap();
    assert!(verified.valid);

    let tampered =
        signature::verify(&registry, "ES384", &key_path, "hello!", &signed.signature).unwrap();
    assert!(!tampered.valid);
}

#[test]
fn test_generate_key_for_pbes2_is_rejected() {
    assert_matches!(
        keys::generate(&registry(), "PBES2-HS256+A128KW", None),
        Err(Error::InvalidArgument(_))
    );
    assert_matches!(
        keys::generate(&registry(), "EdDSA", None),
        Err(Error::Jwa(jose_jwa::Error::UnsupportedAlgorithm(_)))
    );
}

#[test]
fn test_verify_rejects_non_base64_signature() {
    let registry = registry();
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("es256.json");
    keys::generate(&registry, "ES256", Some(&key_path)).unwrap();

    assert_matches!(
        signature::verify(&registry, "ES256", &key_path, "hello", "***"),
        Err(Error::Base64(_))
    );
}

#[test]
fn test_execute_dispatches_to_command() {
    let response = execute(&Commands::Algorithms, &registry()).unwrap();
    assert_eq!(response["signature"][0], "ES256");
}

#[test]
fn test_config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"pbes2_iteration_count\": 2048}}").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from(["jose-cli", "--config", &path, "algorithms"]).unwrap();
    let config = load_config(&cli).unwrap();
    assert_eq!(config.pbes2_iteration_count, 2048);
}

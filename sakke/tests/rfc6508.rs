//! RFC 6508 Appendix A worked example

use hex_literal::hex;
use num_bigint::{BigInt, BigUint, Sign};
use sakke::pairing::tate_lichtenbaum;
use sakke::{identifier, EncapsulatedData, MasterSecret, ParameterSet, Sakke, SharedSecretValue};

const Z: [u8; 20] = hex!("AFF429D35F84B110D094803B3595A6E2998BC99F");

const SSV: [u8; 16] = hex!("123456789ABCDEF0123456789ABCDEF0");

const R: [u8; 128] = hex!(
    "13ee3e1b8dac5db168b1ceb32f0566a4c273693f78baffa2a2ee6a686e6bd90f"
    "8206ccab84e7f42ed39bd4fb131012ecca2ecd2119414560c17cab46b956a80f"
    "58a3302eb3e2c9a228fba7ed34d8aca2392da1ffb0b17b2320ae09aaedfd0235"
    "f6fe0eb65337a63f9cc97728b8e5ad0460fade144369aa5b2166213247712096"
);

const RX: [u8; 128] = hex!(
    "44e8ad44ab8592a6a5a3ddca5cf896c718043606a01d650def37a01f37c228c3"
    "32fc317354e2c274d4daf8ad001054c76ce57971c6f4486d5723043261c506eb"
    "f5be438f53de04f067c776e0dd3b71a6290133283725a532f21af145126dc1d7"
    "77ecc27be50835bd28098b8a73d9f801d893793a41ff5c49b87e79f2be4d56ce"
);

const RY: [u8; 128] = hex!(
    "557e134ad85bb1d4b9ce4f8be4b08a12babf55b1d6f1d7a638019ea28e15ab1c"
    "9f76375fdd1210d4f4351b9a009486b7f3ed46c965ded2d80dade4f38c6721d5"
    "2c3ad103a10ebd2959248b4ef006836bf097448e6107c9edee9fb704823df199"
    "f832c905ae45f8a247a072d8ef729eabc5e27574b07739b34be74a532f747b86"
);

const G_R: [u8; 128] = hex!(
    "7d2a8438e6291c649b6579eb3b79eae948b1de9e5f7d1f4070a08f8db6b3c515"
    "6f2201affbb5cb9d82aa3ec0d0398b89abc78a13a760c0bf3f77e63d0df3f1a3"
    "41a41b8811df197fd6cd0f003125606f4f109f400f7292a10d255e3c0ebccb42"
    "53fb182c68f09cf6cd9c4a53da6c74ad007af36b8bca979d5895e282f483fcd6"
);

const H: [u8; 16] = hex!("89e0bc661aa1e91638e6acc84e496507");

fn int(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

fn setup() -> (Sakke, MasterSecret, Vec<u8>) {
    let sakke = Sakke::new(1).unwrap();
    let kms = MasterSecret::new(sakke.params(), &Z).unwrap();
    let id = identifier("2011-02", "tel:+447700900123").into_vec();
    (sakke, kms, id)
}

#[test]
fn receiver_secret_key_validates() {
    let (sakke, kms, id) = setup();
    let z = kms.public_key();
    let rsk = kms.extract_receiver_secret_key(&id).unwrap();
    sakke.validate_receiver_secret_key(&id, &z, &rsk).unwrap();

    let other = kms
        .extract_receiver_secret_key(&identifier("2011-03", "tel:+447700900123"))
        .unwrap();
    assert_eq!(
        sakke.validate_receiver_secret_key(&id, &z, &other).unwrap_err(),
        sakke::Error::InvalidReceiverSecretKey
    );
}

#[test]
fn encapsulation() {
    let (sakke, kms, id) = setup();
    let z = kms.public_key();

    let r = BigUint::from_bytes_be(&R);
    let point = sakke.multiply_identifier_point(&r, &id, &z).unwrap();
    assert_eq!(point.x().unwrap(), &int(&RX));
    assert_eq!(point.y().unwrap(), &int(&RY));

    let data = sakke
        .encapsulate_with_ssv(&SharedSecretValue::new(SSV), &id, &z)
        .unwrap();
    assert_eq!(data.r(), &point);
    assert_eq!(data.h().as_bytes(), &H);

    let mut expected = vec![0x04];
    expected.extend_from_slice(&RX);
    expected.extend_from_slice(&RY);
    expected.extend_from_slice(&H);
    assert_eq!(data.to_bytes().as_bytes(), expected.as_slice());
}

#[test]
fn pairing_reproduces_g_r() {
    let (_, kms, id) = setup();
    let params = ParameterSet::get(1).unwrap();
    let rsk = kms.extract_receiver_secret_key(&id).unwrap();
    let r = params.curve().point(int(&RX), int(&RY)).unwrap();

    let w = tate_lichtenbaum(&r, &rsk)
        .unwrap()
        .to_pf_integer()
        .unwrap();
    assert_eq!(w, BigUint::from_bytes_be(&G_R));
}

#[test]
fn decapsulation() {
    let (sakke, kms, id) = setup();
    let z = kms.public_key();
    let rsk = kms.extract_receiver_secret_key(&id).unwrap();

    let mut bytes = vec![0x04];
    bytes.extend_from_slice(&RX);
    bytes.extend_from_slice(&RY);
    bytes.extend_from_slice(&H);
    let data = EncapsulatedData::from_bytes(sakke.params(), &bytes).unwrap();

    let ssv = sakke.decapsulate(&data, &id, &z, &rsk).unwrap();
    assert_eq!(ssv.as_bytes(), &SSV);
}

#[test]
fn wrong_identifier_fails_decapsulation() {
    let (sakke, kms, id) = setup();
    let z = kms.public_key();
    let data = sakke
        .encapsulate_with_ssv(&SharedSecretValue::new(SSV), &id, &z)
        .unwrap();

    let other = identifier("2011-02", "tel:+447700900124");
    let rsk = kms.extract_receiver_secret_key(&other).unwrap();
    assert_eq!(
        sakke.decapsulate(&data, &other, &z, &rsk).unwrap_err(),
        sakke::Error::DecapsulationFailed
    );
}

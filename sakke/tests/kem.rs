use sakke::{
    identifier, Decapsulate, DecapsulationKey, Encapsulate, EncapsulationKey, Error, MasterSecret,
    Sakke,
};

#[test]
fn encapsulate_decapsulate() {
    let mut rng = rand::thread_rng();
    let sakke = Sakke::new(1).unwrap();
    let kms = MasterSecret::random(sakke.params(), &mut rng);
    let id = identifier("2024-10", "sip:alice@example.org");

    let ek = EncapsulationKey::new(sakke, id.clone(), kms.public_key()).unwrap();
    let rsk = kms.extract_receiver_secret_key(&id).unwrap();
    let dk = DecapsulationKey::new(ek.clone(), rsk).unwrap();
    assert_eq!(dk.encapsulation_key(), &ek);

    let (data, ss1) = ek.encapsulate(&mut rng).unwrap();
    let ss2 = dk.decapsulate(&data).unwrap();
    assert_eq!(ss1, ss2);
    assert_eq!(ss1.len(), 16);
}

#[test]
fn mismatched_receiver_secret_key() {
    let mut rng = rand::thread_rng();
    let sakke = Sakke::new(1).unwrap();
    let kms = MasterSecret::random(sakke.params(), &mut rng);
    let other_kms = MasterSecret::random(sakke.params(), &mut rng);
    let id = identifier("2024-10", "sip:alice@example.org");

    let ek = EncapsulationKey::new(sakke, id.clone(), kms.public_key()).unwrap();
    let rsk = other_kms.extract_receiver_secret_key(&id).unwrap();
    assert_eq!(
        DecapsulationKey::new(ek, rsk).unwrap_err(),
        Error::InvalidReceiverSecretKey
    );
}

#[test]
fn identity_kms_public_key_is_rejected() {
    let sakke = Sakke::new(1).unwrap();
    let identity = sakke.params().curve().identity();
    let id = identifier("2024-10", "tel:+1");
    assert!(EncapsulationKey::new(sakke, id, identity).is_err());
}

//! SAKKE domain parameters.
//!
//! Parameter sets are identified by the IANA "SAKKE Parameter Set" registry value carried in
//! MIKEY-SAKKE messages. Only parameter set 1 of RFC 6509 Appendix A is registered.

use crate::curve::{AffinePoint, Curve, PrimeCurve};
use crate::field::{Field, PrimeField};
use crate::table::LookupTable;
use crate::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use octet_string::OctetString;
use std::sync::{Arc, OnceLock};

/// Number of precomputed multiples of `P` kept for fixed-base multiplication
const TABLE_SIZE: usize = 16;

/// Constants of one parameter set, as printed in RFC 6509
struct RawParameterSet {
    id: u8,
    n: usize,
    p: &'static str,
    q: &'static str,
    px: &'static str,
    py: &'static str,
    g: &'static str,
}

const PARAMETER_SET_1: RawParameterSet = RawParameterSet {
    id: 1,
    n: 128,
    p: "
    997ABB1F 0A563FDA 65C61198 DAD0657A
    416C0CE1 9CB48261 BE9AE358 B3E01A2E
    F40AAB27 E2FC0F1B 228730D5 31A59CB0
    E791B39F F7C88A19 356D27F4 A666A6D0
    E26C6487 326B4CD4 512AC5CD 65681CE1
    B6AFF4A8 31852A82 A7CF3C52 1C3C09AA
    9F94D6AF 56971F1F FCE3E823 89857DB0
    80C5DF10 AC7ACE87 666D807A FEA85FEB",
    q: "
    265EAEC7 C2958FF6 99718466 36B4195E
    905B0338 672D2098 6FA6B8D6 2CF8068B
    BD02AAC9 F8BF03C6 C8A1CC35 4C69672C
    39E46CE7 FDF22286 4D5B49FD 2999A9B4
    389B1921 CC9AD335 144AB173 595A0738
    6DABFD2A 0C614AA0 A9F3CF14 870F026A
    A7E535AB D5A5C7C7 FF38FA08 E2615F6C
    203177C4 2B1EB3A1 D99B601E BFAA17FB",
    px: "
    53FC09EE 332C29AD 0A799005 3ED9B52A
    2B1A2FD6 0AEC69C6 98B2F204 B6FF7CBF
    B5EDB6C0 F6CE2308 AB10DB90 30B09E10
    43D5F22C DB9DFA55 718BD9E7 406CE890
    9760AF76 5DD5BCCB 337C8654 8B72F2E1
    A702C339 7A60DE74 A7C1514D BA66910D
    D5CFB4CC 80728D87 EE9163A5 B63F73EC
    80EC46C4 967E0979 880DC8AB EAE63895",
    py: "
    0A824906 3F6009F1 F9F1F053 3634A135
    D3E82016 02990696 3D778D82 1E141178
    F5EA69F4 654EC2B9 E7F7F5E5 F0DE55F6
    6B598CCF 9A140B2E 416CFF0C A9E032B9
    70DAE117 AD547C6C CAD696B5 B7652FE0
    AC6F1E80 164AA989 492D979F C5A4D5F2
    13515AD7 E9CB99A9 80BDAD5A D5BB4636
    ADB9B570 6A67DCDE 75573FD7 1BEF16D7",
    g: "
    66FC2A43 2B6EA392 148F1586 7D623068
    C6A87BD1 FB94C41E 27FABE65 8E015A87
    371E9474 4C96FEDA 449AE956 3F8BC446
    CBFDA85D 5D00EF57 7072DA8F 541721BE
    EE0FAED1 828EAB90 B99DFB01 38C78433
    55DF0460 B4A9FD74 B4F1A32B CAFA1FFA
    D682C033 A7942BCC E3720F20 B9B7B040
    3C8CAE87 B7A0042A CDE0FAB3 6461EA46",
};

/// A SAKKE parameter set: the curve `E: y^2 = x^3 - 3x` over `F_p`, a point `P` of prime order
/// `q` with `p = 4q - 1`, the pairing value `g = <P, P>` and the SSV length `n` in bits.
///
/// The hash function is SHA-256 for every registered set.
#[derive(Debug)]
pub struct ParameterSet {
    id: u8,
    n: usize,
    p: BigInt,
    q: BigUint,
    curve: Arc<PrimeCurve>,
    point: AffinePoint<PrimeField>,
    table: LookupTable<PrimeField>,
    g: BigUint,
}

fn parse(hex: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(OctetString::from_hex(hex)?.as_bytes()))
}

impl ParameterSet {
    /// Look up a parameter set by its registry identifier.
    ///
    /// Parameters are parsed and validated on first use and shared afterwards.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedParameterSet`] for any identifier other than 1.
    pub fn get(id: u8) -> Result<&'static Self> {
        static SET_1: OnceLock<Result<ParameterSet>> = OnceLock::new();

        match id {
            1 => {
                let set = SET_1.get_or_init(|| Self::build(&PARAMETER_SET_1));
                set.as_ref().map_err(|e| *e)
            }
            _ => Err(Error::UnsupportedParameterSet(id)),
        }
    }

    fn build(raw: &RawParameterSet) -> Result<Self> {
        let p = BigInt::from_biguint(Sign::Plus, parse(raw.p)?);
        let q = parse(raw.q)?;
        let field = PrimeField::new(p.clone());
        let a = field.from_int(&BigInt::from(-3));
        let curve = Arc::new(Curve::new(field, a, BigInt::from(0)).with_order(q.clone()));

        let px = BigInt::from_biguint(Sign::Plus, parse(raw.px)?);
        let py = BigInt::from_biguint(Sign::Plus, parse(raw.py)?);
        let point = curve.point(px, py)?;
        let table = LookupTable::new(&point, TABLE_SIZE)?;

        Ok(Self {
            id: raw.id,
            n: raw.n,
            p,
            q,
            curve,
            point,
            table,
            g: parse(raw.g)?,
        })
    }

    /// Registry identifier
    #[must_use]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Security parameter: length in bits of the SSV and of the hash output mask
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The field characteristic `p`
    #[must_use]
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    /// The order `q` of `P`
    #[must_use]
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// The curve `E(F_p)`
    #[must_use]
    pub fn curve(&self) -> &Arc<PrimeCurve> {
        &self.curve
    }

    /// The base point `P`
    #[must_use]
    pub fn point(&self) -> &AffinePoint<PrimeField> {
        &self.point
    }

    /// `[k]P` using the precomputed table.
    #[must_use]
    pub fn multiply_base(&self, k: &BigUint) -> AffinePoint<PrimeField> {
        self.table.multiply(k)
    }

    /// `g = <P, P>` as an integer representing an element of `PF_p`
    #[must_use]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Length in octets of a field element
    #[must_use]
    pub fn element_len(&self) -> usize {
        self.curve.coordinate_len()
    }
}

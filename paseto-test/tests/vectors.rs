//! Known-answer tokens. The `local` ones are produced from fixed nonce seeds,
//! so any change to key derivation, nonce handling or PAE shows up as a
//! different token.

use paseto::{PasetoError, Purpose, TokenBuilder, Version};
use paseto_core::tokens::SealedToken;
use paseto_core::version::{LocalVersion, PublicVersion};
use paseto_test::{parser_builder, shared_secret};
use paseto_v1::V1;
use paseto_v2::V2;

const SIGNED: &str = r#"{"data":"this is a signed message","exp":"2019-01-01T00:00:00+00:00"}"#;
const SECRET: &str = r#"{"data":"this is a secret message","exp":"2019-01-01T00:00:00+00:00"}"#;

const ZERO_V1_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const V1_NONCE: &str = "26f7553354482a1d91d4784627854b8da6b8042a7966523c2b404e8dbbe7f7f2";
const ZERO_V2_SEED: &str = "000000000000000000000000000000000000000000000000";
const V2_NONCE: &str = "45742c976d684ff84ebdc0de59809a97cda2f64c84fda19b";

const LOCAL_KID: &str = "UbkK8Y6iv4GZhFp6Tx3IWLWLfNXSEvJcdT3zdR65YZxo";
const PUBLIC_KID: &str = "zVhMiPBP9fRf2snEcT7gFTioeA9COcNy9DfgL1W60haN";

struct LocalVector {
    name: &'static str,
    version: Version,
    seed: &'static str,
    payload: &'static str,
    kid: Option<&'static str>,
    token: &'static str,
}

const LOCAL: &[LocalVector] = &[
    LocalVector {
        name: "v1-E-1",
        version: Version::V1,
        seed: ZERO_V1_SEED,
        payload: SIGNED,
        kid: None,
        token: "v1.local.WzhIh1MpbqVNXNt7-HbWvL-JwAym3Tomad9Pc2nl7wK87vGraUVvn2bs8BBNo7jbukCNrkVID0jCK2vr5bP18G78j1bOTbBcP9HZzqnraEdspcjd_PvrxDEhj9cS2MG5fmxtvuoHRp3M24HvxTtql9z26KTfPWxJN5bAJaAM6gos8fnfjJO8oKiqQMaiBP_Cqncmqw8",
    },
    LocalVector {
        name: "v1 zero seed, secret message",
        version: Version::V1,
        seed: ZERO_V1_SEED,
        payload: SECRET,
        kid: None,
        token: "v1.local.w_NOpjgte4bX-2i1JAiTQzHoGUVOgc2yqKqsnYGmaPaCu_KWUkRGlCRnOvZZxeH4HTykY7AE_jkzSXAYBkQ1QnwvKS16uTXNfnmp8IRknY76I2m3S5qsM8klxWQQKFDuQHl8xXV0MwAoeFh9X6vbwIqrLlof3s4PMjRDwKsxYzkMr1RvfDI8emoPoW83q4Q60_xpHaw",
    },
    LocalVector {
        name: "v1 fixed nonce seed",
        version: Version::V1,
        seed: V1_NONCE,
        payload: SIGNED,
        kid: None,
        token: "v1.local.4VyfcVcFAOAbB8yEM1j1Ob7Iez5VZJy5kHNsQxmlrAwKUbOtq9cv39T2fC0MDWafX0nQJ4grFZzTdroMvU772RW-X1oTtoFBjsl_3YYHWnwgqzs0aFc3ejjORmKP4KUM339W3syBYyjKIOeWnsFQB6Yef-1ov9rvqt7TmwONUHeJUYk4IK_JEdUeo_uFRqAIgHsiGCg",
    },
    LocalVector {
        name: "v1 fixed nonce seed with kid footer",
        version: Version::V1,
        seed: V1_NONCE,
        payload: SIGNED,
        kid: Some(LOCAL_KID),
        token: "v1.local.4VyfcVcFAOAbB8yEM1j1Ob7Iez5VZJy5kHNsQxmlrAwKUbOtq9cv39T2fC0MDWafX0nQJ4grFZzTdroMvU772RW-X1oTtoFBjsl_3YYHWnwgqzs0aFc3ejjORmKP4KUM339W3szA28OabR192eRqiyspQ6xPM35NMR-04-FhRJZEWiF0W5oWjPVtGPjeVjm2DI4YtJg.eyJraWQiOiJVYmtLOFk2aXY0R1poRnA2VHgzSVdMV0xmTlhTRXZKY2RUM3pkUjY1WVp4byJ9",
    },
    LocalVector {
        name: "v2-E-1",
        version: Version::V2,
        seed: ZERO_V2_SEED,
        payload: SIGNED,
        kid: None,
        token: "v2.local.97TTOvgwIxNGvV80XKiGZg_kD3tsXM_-qB4dZGHOeN1cTkgQ4PnW8888l802W8d9AvEGnoNBY3BnqHORy8a5cC8aKpbA0En8XELw2yDk2f1sVODyfnDbi6rEGMY3pSfCbLWMM2oHJxvlEl2XbQ",
    },
    LocalVector {
        name: "v2 zero seed, secret message",
        version: Version::V2,
        seed: ZERO_V2_SEED,
        payload: SECRET,
        kid: None,
        token: "v2.local.CH50H-HM5tzdK4kOmQ8KbIvrzJfjYUGuu5Vy9ARSFHy9owVDMYg3-8rwtJZQjN9ABHb2njzFkvpr5cOYuRyt7CRXnHt42L5yZ7siD-4l-FoNsC7J2OlvLlIwlG06mzQVunrFNb7Z3_CHM0PK5w",
    },
    LocalVector {
        name: "v2 fixed nonce seed",
        version: Version::V2,
        seed: V2_NONCE,
        payload: SIGNED,
        kid: None,
        token: "v2.local.5K4SCXNhItIhyNuVIZcwrdtaDKiyF81-eWHScuE0idiVqCo72bbjo07W05mqQkhLZdVbxEa5I_u5sgVk1QLkcWEcOSlLHwNpCkvmGGlbCdNExn6Qclw3qTKIIl5-O5xRBN076fSDPo5xUCPpBA",
    },
    LocalVector {
        name: "v2 fixed nonce seed with kid footer",
        version: Version::V2,
        seed: V2_NONCE,
        payload: SIGNED,
        kid: Some(LOCAL_KID),
        token: "v2.local.5K4SCXNhItIhyNuVIZcwrdtaDKiyF81-eWHScuE0idiVqCo72bbjo07W05mqQkhLZdVbxEa5I_u5sgVk1QLkcWEcOSlLHwNpCkvmGGlbCdNExn6Qclw3qTKIIl5-i_LdbzmSXn-fMpoI65h2Rw.eyJraWQiOiJVYmtLOFk2aXY0R1poRnA2VHgzSVdMV0xmTlhTRXZKY2RUM3pkUjY1WVp4byJ9",
    },
];

impl LocalVector {
    fn seed(&self) -> Vec<u8> {
        hex::decode(self.seed).unwrap()
    }

    fn footer(&self) -> String {
        self.kid
            .map(|kid| format!(r#"{{"kid":"{kid}"}}"#))
            .unwrap_or_default()
    }

    fn data(&self) -> &'static str {
        if self.payload == SIGNED {
            "this is a signed message"
        } else {
            "this is a secret message"
        }
    }
}

fn encrypt_with_seed(
    version: Version,
    seed: &[u8],
    payload: &[u8],
    footer: &[u8],
) -> Result<Vec<u8>, PasetoError> {
    match version {
        Version::V1 => V1::dangerous_encrypt_with_seed(&shared_secret(), seed, payload, footer),
        Version::V2 => V2::dangerous_encrypt_with_seed(&shared_secret(), seed, payload, footer),
    }
}

#[test]
fn local_encrypt() {
    for v in LOCAL {
        let footer = v.footer().into_bytes();
        let body = encrypt_with_seed(v.version, &v.seed(), v.payload.as_bytes(), &footer).unwrap();
        let token = SealedToken::new(v.version, Purpose::Local, body, footer);
        assert_eq!(token.to_string(), v.token, "{}", v.name);
    }
}

#[test]
fn local_decrypt() {
    for v in LOCAL {
        let token: SealedToken = v.token.parse().unwrap();
        let plaintext = match v.version {
            Version::V1 => V1::decrypt(&shared_secret(), token.payload(), token.unverified_footer()),
            Version::V2 => V2::decrypt(&shared_secret(), token.payload(), token.unverified_footer()),
        }
        .unwrap();
        assert_eq!(plaintext, v.payload.as_bytes(), "{}", v.name);
    }
}

#[test]
fn builder_reproduces_local_tokens() {
    for v in LOCAL {
        let mut builder = match v.version {
            Version::V1 => TokenBuilder::v1_local(shared_secret()),
            Version::V2 => TokenBuilder::v2_local(shared_secret()),
        }
        .claim("data", v.data())
        .claim("exp", "2019-01-01T00:00:00+00:00");
        if let Some(kid) = v.kid {
            builder = builder.key_id(kid);
        }

        let token = builder.dangerous_compact_with_seed(&v.seed()).unwrap();
        assert_eq!(token, v.token, "{}", v.name);
    }
}

#[test]
fn parser_accepts_local_tokens() {
    let parser = parser_builder().build().unwrap();

    for v in LOCAL {
        let token = parser.parse(v.token).unwrap();
        assert_eq!(token.claims().get_str("data").unwrap(), Some(v.data()), "{}", v.name);
        assert_eq!(token.footer().key_id().unwrap(), v.kid, "{}", v.name);
    }
}

fn v2_vector_key() -> paseto_v2::SecretKey {
    paseto_v2::SecretKey::from_bytes(
        &hex::decode(
            "b4cbfb43df4ce210727d953e4a713307fa19bb7d9f85041438d9e11b942a3774\
             1eb9dbbbbc047c03fd70604e0071f0987e16b28b757225c11f00415d0e20b1a2",
        )
        .unwrap(),
    )
    .unwrap()
}

const V2_PUBLIC: &[(&str, Option<&str>, &str)] = &[
    (
        "v2-S-1",
        None,
        "v2.public.eyJkYXRhIjoidGhpcyBpcyBhIHNpZ25lZCBtZXNzYWdlIiwiZXhwIjoiMjAxOS0wMS0wMVQwMDowMDowMCswMDowMCJ9HQr8URrGntTu7Dz9J2IF23d1M7-9lH9xiqdGyJNvzp4angPW5Esc7C5huy_M8I8_DjJK2ZXC2SUYuOFM-Q_5Cw",
    ),
    (
        "v2 public with kid footer",
        Some(PUBLIC_KID),
        "v2.public.eyJkYXRhIjoidGhpcyBpcyBhIHNpZ25lZCBtZXNzYWdlIiwiZXhwIjoiMjAxOS0wMS0wMVQwMDowMDowMCswMDowMCJ9flsZsx_gYCR0N_Ec2QxJFFpvQAs7h9HtKwbVK2n1MJ3Rz-hwe8KUqjnd8FAnIJZ601tp7lGkguU63oGbomhoBw.eyJraWQiOiJ6VmhNaVBCUDlmUmYyc25FY1Q3Z0ZUaW9lQTlDT2NOeTlEZmdMMVc2MGhhTiJ9",
    ),
];

#[test]
fn v2_public_tokens() {
    let key = v2_vector_key();
    assert_eq!(
        hex::encode(key.public_key().as_bytes()),
        "1eb9dbbbbc047c03fd70604e0071f0987e16b28b757225c11f00415d0e20b1a2"
    );

    let parser = paseto::ParserBuilder::new()
        .public_key(key.public_key())
        .clock(paseto_test::fixed_clock())
        .build()
        .unwrap();

    for &(name, kid, expected) in V2_PUBLIC {
        let footer = kid.map(|kid| format!(r#"{{"kid":"{kid}"}}"#)).unwrap_or_default();
        let body = <V2 as PublicVersion>::sign(&key, SIGNED.as_bytes(), footer.as_bytes()).unwrap();
        let token = SealedToken::new(Version::V2, Purpose::Public, body, footer.into_bytes());
        assert_eq!(token.to_string(), expected, "{name}");

        let mut builder = TokenBuilder::v2_public(key.clone())
            .claim("data", "this is a signed message")
            .claim("exp", "2019-01-01T00:00:00+00:00");
        if let Some(kid) = kid {
            builder = builder.key_id(kid);
        }
        assert_eq!(builder.compact().unwrap(), expected, "{name}");

        let parsed = parser.parse(expected).unwrap();
        assert_eq!(parsed.footer().key_id().unwrap(), kid, "{name}");
    }
}

/// RSA-PSS signatures are salted, so v1 public tokens are checked by
/// verification only, against a token signed by an independent implementation.
const V1_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA5OD3y8U6foiMBC7b3/qg
Z81sWRJUhc7Q3lYnHcQgW4k889YO7h01KYdBppHFv6ZQnfnoqd+UInviZSVampQ6
jEPy1kuwN76zv39z2PRTCxi1Z/VmvZNyUSZ+T5ZBcdtnxsyRqtdBv4TK6FeMGHI9
4SFfqlxsJplMNvDahVAP+R2P8aulF+V2HRhBdJGmX5MJJpJthWJ5m45vBuNkABhJ
yLUxAbtkjcNu0VnUBjzI3HRLzFH52g/Wo3dqyRWrBTKlmmAmUwpSg6GQ/xm6q9qY
485+z5czLmkL5DZy5a1QsgPwk6m6DnNlNfAbBQuXRza6bUey0oAqA/vo2TLAWx0n
9QIDAQAB
-----END PUBLIC KEY-----
";

const V1_PUBLIC: &[(Option<&str>, &str)] = &[
    (
        None,
        "v1.public.eyJkYXRhIjoidGhpcyBpcyBhIHNpZ25lZCBtZXNzYWdlIiwiZXhwIjoiMjAxOS0wMS0wMVQwMDowMDowMCswMDowMCJ9XsBXow6ijujJLDA2AAc9gaCrItllT_UCROlgH7bErQGO6kIVH60Rj9_9qH2VHDxbXW7F4KpOjYLHb0Cf1YMQW9NH7nlmc8qD8XtiMnUy69np_NBBeaF3lOOKXeMV_AbKicpl4LHF5P66ILX4fdmInaZWNDzqVdRov6dvKwvmpckLumKyxmiiaUgCFwAlWPBEbFXsoHEiXiJ8nRGP1sP5ahukHyJ5Vz6jWkzFvxX7L-AaZ5u1HGv6xTkKoy8H3WxrPW5HoBXr-5HcBct-yghz_NFlmVAzdv1vnb70L4UdFIHEoxNbvPXcWytoLlgYGJnrNfx4jcG6ylN8L0JCw5er3A",
    ),
    (
        Some("dYkISylxQeecEcHELfzF88UZrwbLolNiCdpzUHGw9Uqn"),
        "v1.public.eyJkYXRhIjoidGhpcyBpcyBhIHNpZ25lZCBtZXNzYWdlIiwiZXhwIjoiMjAxOS0wMS0wMVQwMDowMDowMCswMDowMCJ9pYphC4F8xJDKvA9bbRe3-J8hMDPpd7E_Egy2ZEgGcmbaRZlzQMlCjyz7zcTGnXhDgmI25n9872u1H7Pk-Dq5cSprZU6OzI-LFzpz1AD0pXVDEzVC4rEeDWqdIzxvyw-JIORawnh-pUwL8dFDt57uIlTb_FkH0s7LXo-pK12slZojI_qwvY95xf0pz3vjU4B0F0xJ5y4ECQz66uoL8WV-lWw322hx9u_nNUG6Xjtpg-spa_1uX3mvKITAohxkD_WSBiNBHcSReRgC1dQTShUpKbL1_R6GxGhHhztNtRMiRh4X44fRMAZ8WJyGVcvP6QmfZQ08Yy1AL_rzXT3LDlI7qA.eyJraWQiOiJkWWtJU3lseFFlZWNFY0hFTGZ6Rjg4VVpyd2JMb2xOaUNkcHpVSEd3OVVxbiJ9",
    ),
];

#[test]
fn v1_public_tokens_verify() {
    let key = paseto_v1::PublicKey::from_pem(V1_PUBLIC_KEY).unwrap();
    let parser = paseto::ParserBuilder::new()
        .public_key(key.clone())
        .clock(paseto_test::fixed_clock())
        .build()
        .unwrap();

    for &(kid, token) in V1_PUBLIC {
        let sealed: SealedToken = token.parse().unwrap();
        let message =
            <V1 as PublicVersion>::verify(&key, sealed.payload(), sealed.unverified_footer())
                .unwrap();
        assert_eq!(message, SIGNED.as_bytes());

        let parsed = parser.parse(token).unwrap();
        assert_eq!(
            parsed.claims().get_str("data").unwrap(),
            Some("this is a signed message")
        );
        assert_eq!(parsed.footer().key_id().unwrap(), kid);
    }

    // the same signature under a different footer
    let (_, signed) = V1_PUBLIC[1];
    let (body, _) = signed.rsplit_once('.').unwrap();
    assert!(matches!(
        parser.parse(body),
        Err(PasetoError::AuthenticationFailed)
    ));
}

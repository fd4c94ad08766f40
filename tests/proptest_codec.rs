//! Property-based tests: encoder determinism, fixed-width integer layout,
//! and byte-exact schema round-trips for arbitrary type trees.

use proptest::prelude::*;

use ccd_params::prelude::*;

fn arb_size_length() -> impl Strategy<Value = SizeLength> {
    prop_oneof![
        Just(SizeLength::U8),
        Just(SizeLength::U16),
        Just(SizeLength::U32),
        Just(SizeLength::U64),
    ]
}

fn arb_fields(ty: BoxedStrategy<Type>) -> BoxedStrategy<Fields> {
    prop_oneof![
        Just(Fields::None),
        prop::collection::vec(ty.clone(), 0..4).prop_map(Fields::Unnamed),
        prop::collection::vec(("[a-z]{1,8}", ty), 0..4).prop_map(Fields::Named),
    ]
    .boxed()
}

fn arb_type() -> impl Strategy<Value = Type> {
    let scalar = prop::sample::select(vec![
        Type::Unit,
        Type::Bool,
        Type::U8,
        Type::U16,
        Type::U32,
        Type::U64,
        Type::U128,
        Type::I8,
        Type::I16,
        Type::I32,
        Type::I64,
        Type::I128,
        Type::Amount,
        Type::AccountAddress,
        Type::ContractAddress,
        Type::Timestamp,
        Type::Duration,
    ]);
    let leaf = prop_oneof![
        scalar,
        arb_size_length().prop_map(Type::String),
        arb_size_length().prop_map(Type::ContractName),
        arb_size_length().prop_map(Type::ReceiveName),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Type::Pair(Box::new(a), Box::new(b))),
            (arb_size_length(), inner.clone())
                .prop_map(|(len, elem)| Type::List(len, Box::new(elem))),
            (arb_size_length(), inner.clone())
                .prop_map(|(len, elem)| Type::Set(len, Box::new(elem))),
            (arb_size_length(), inner.clone(), inner.clone())
                .prop_map(|(len, k, v)| Type::Map(len, Box::new(k), Box::new(v))),
            (0u32..8, inner.clone()).prop_map(|(n, elem)| Type::Array(n, Box::new(elem))),
            arb_fields(inner.clone()).prop_map(Type::Struct),
            prop::collection::vec(("[A-Z][a-z]{0,7}", arb_fields(inner.clone())), 0..4)
                .prop_map(Type::Enum),
        ]
    })
}

fn arb_contract() -> impl Strategy<Value = Contract> {
    (
        prop::option::of(arb_type()),
        prop::option::of(arb_type()),
        prop::collection::vec(("[a-z]{1,10}", arb_type()), 0..3),
    )
        .prop_map(|(state, init, receive)| Contract {
            state,
            init,
            receive,
        })
}

fn arb_module() -> impl Strategy<Value = Module> {
    prop::collection::vec(("[a-z_]{1,12}", arb_contract()), 0..3)
        .prop_map(|contracts| Module { contracts })
}

proptest! {
    #[test]
    fn encoding_is_deterministic(amount in any::<u64>(), memo in ".{0,32}") {
        let ty = Type::Struct(Fields::Named(vec![
            ("amount".into(), Type::U64),
            ("memo".into(), Type::String(SizeLength::U32)),
        ]));
        let value = Value::record([
            ("memo", Value::String(memo)),
            ("amount", Value::U64(amount)),
        ]);
        let first = encode_value(&ty, &value).unwrap();
        let second = encode_value(&ty, &value).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn u8_encodes_as_itself(v in any::<u8>()) {
        prop_assert_eq!(encode_value(&Type::U8, &Value::U8(v)).unwrap(), vec![v]);
    }

    #[test]
    fn u16_encodes_little_endian(v in any::<u16>()) {
        prop_assert_eq!(
            encode_value(&Type::U16, &Value::U16(v)).unwrap(),
            v.to_le_bytes().to_vec()
        );
    }

    #[test]
    fn string_prefix_is_utf8_byte_count(s in ".{0,64}") {
        let bytes = encode_value(
            &Type::String(SizeLength::U32),
            &Value::String(s.clone()),
        ).unwrap();
        let mut expected = (s.len() as u32).to_le_bytes().to_vec();
        expected.extend_from_slice(s.as_bytes());
        prop_assert_eq!(bytes, expected);
    }

    #[test]
    fn list_starts_with_element_count(elems in prop::collection::vec(any::<u8>(), 0..=255)) {
        let ty = Type::List(SizeLength::U8, Box::new(Type::U8));
        let value = Value::Seq(elems.iter().copied().map(Value::U8).collect());
        let bytes = encode_value(&ty, &value).unwrap();
        prop_assert_eq!(bytes.first().copied(), Some(elems.len() as u8));
        prop_assert_eq!(bytes.len(), 1 + elems.len());
    }

    #[test]
    fn schema_roundtrips_byte_exact(module in arb_module()) {
        let bytes = module.to_bytes().unwrap();
        let decoded = Module::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &module);
        prop_assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn type_trees_roundtrip_through_contract_init(ty in arb_type()) {
        let module = Module {
            contracts: vec![("c".to_owned(), Contract {
                state: None,
                init: Some(ty),
                receive: Vec::new(),
            })],
        };
        let bytes = module.to_bytes().unwrap();
        let decoded = Module::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, module);
    }
}

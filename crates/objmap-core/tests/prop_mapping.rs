//! Property-based tests for the mapping engine
//!
//! These tests verify invariants that should hold for all inputs: collection
//! order, rename symmetry, and range-checked numeric conversion.


use objmap_core::{mappable_model, MapBuilder, Mapper};
use proptest::prelude::*;
use test_support::*;

#[derive(Debug, Clone, Default, PartialEq)]
struct Reading {
    value: i64,
    label: String,
}

mappable_model!(Reading {
    "Value" => value,
    "Label" => label,
});

#[derive(Debug, Clone, Default, PartialEq)]
struct CompactReading {
    value: i16,
    label: String,
}

mappable_model!(CompactReading {
    "Value" => value,
    "Label" => label,
});

#[derive(Debug, Clone, Default, PartialEq)]
struct TextReading {
    value: String,
    label: String,
}

mappable_model!(TextReading {
    "Value" => value,
    "Label" => label,
});

// Strategy functions for property testing

/// Strategy for generating addresses
fn address_strategy() -> impl Strategy<Value = Address> {
    (
        "[a-zA-Z0-9 ]{0,30}",
        "[a-zA-Z ]{0,20}",
        "[0-9]{5}",
    )
        .prop_map(|(street, city, postal_code)| Address {
            street,
            city,
            postal_code,
        })
}

/// Strategy for generating customers
fn customer_strategy() -> impl Strategy<Value = Customer> {
    ("[a-zA-Z .'-]{0,40}", address_strategy()).prop_map(|(name, primary_address)| Customer {
        name,
        primary_address,
    })
}

/// Strategy for generating order items
fn order_item_strategy() -> impl Strategy<Value = OrderItem> {
    ("[A-Z]{2}-[0-9]{2}", 0i32..1000, 0.0f64..10_000.0).prop_map(|(sku, quantity, unit_price)| {
        OrderItem {
            sku,
            quantity,
            unit_price,
        }
    })
}

fn reading_mapper() -> Mapper {
    let mapper = Mapper::new();
    MapBuilder::<Reading, CompactReading>::new()
        .auto_map()
        .register(&mapper)
        .expect("valid configuration");
    MapBuilder::<Reading, TextReading>::new()
        .auto_map()
        .register(&mapper)
        .expect("valid configuration");
    mapper
}

proptest! {
    #[test]
    fn prop_collections_preserve_order(items in prop::collection::vec(order_item_strategy(), 0..20)) {
        let mapper = partner_mapper();
        let order = Order { items: items.clone(), ..Order::default() };

        let partner: PartnerOrder = mapper.map(&order).unwrap();

        prop_assert_eq!(partner.lines.len(), items.len());
        for (line, item) in partner.lines.iter().zip(&items) {
            prop_assert_eq!(&line.sku, &item.sku);
            prop_assert_eq!(line.quantity, i64::from(item.quantity));
            prop_assert_eq!(line.unit_price, item.unit_price);
        }
    }

    #[test]
    fn prop_rename_round_trip(customer in customer_strategy()) {
        let mapper = partner_mapper();

        let partner: PartnerCustomer = mapper.map(&customer).unwrap();
        prop_assert_eq!(&partner.full_name, &customer.name);
        prop_assert_eq!(&partner.address.zip, &customer.primary_address.postal_code);

        let back: Customer = mapper.map(&partner).unwrap();
        prop_assert_eq!(back, customer);
    }

    #[test]
    fn prop_narrowing_is_range_checked(value in any::<i64>(), label in "[a-z]{0,8}") {
        let mapper = reading_mapper();

        let compact: CompactReading = mapper.map(&Reading { value, label: label.clone() }).unwrap();

        let expected = i16::try_from(value).unwrap_or_default();
        prop_assert_eq!(compact.value, expected);
        prop_assert_eq!(compact.label, label);
    }

    #[test]
    fn prop_text_round_trip(value in any::<i64>()) {
        let mapper = reading_mapper();
        let reading = Reading { value, label: String::new() };

        let text: TextReading = mapper.map(&reading).unwrap();
        prop_assert_eq!(&text.value, &value.to_string());

        let back: Reading = mapper.map(&text).unwrap();
        prop_assert_eq!(back, reading);
    }
}

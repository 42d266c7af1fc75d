//! Paths and templates over a contact record.
//!
//! Run with: cargo run --package docpath --example name_and_address

use docpath::{keys, PathResult, RootContext};
use serde_json::json;

fn main() -> PathResult<()> {
    let ctx = RootContext::new();
    let root = ctx.root();

    let given_name = root.sub_path(keys!["givenName"]);
    let family_name = root.sub_path(keys!["familyName"]);
    let emails = root.sub_path(keys!["emails"]).dynamic_child();
    let address = root.sub_path(keys!["addresses"]).dynamic_child();
    let address_line = address.sub_path_template(keys!["addressLines"]).dynamic_child();
    let postcode = address.sub_path_template(keys!["postcode"]);

    let mut data = json!({
        "givenName": "joe",
        "phoneNumber": null,
        "emails": ["joe-home@example.com"],
        "primaryAddressId": 1,
        "addresses": [
            {"id": 1, "addressLines": ["101 Street Road"], "town": "Somewhere", "postcode": 12345}
        ]
    });

    println!("{} = {:?}", given_name, given_name.get_value(&data));
    println!("{} = {:?}", family_name, family_name.get_value(&data));
    println!("first email = {:?}", emails.get_path(keys![0usize])?.get_value(&data));
    println!("second email = {:?}", emails.get_path(keys![1usize])?.get_value(&data));

    // Second line of the first address does not exist yet
    let second_line = address_line.get_path(keys![0usize, 1usize])?;
    println!("{} = {:?}", second_line, second_line.get_value(&data));
    second_line.set_value(&mut data, json!("Flat 2"))?;

    // Reach the postcode of the same address through a sibling template
    let address_index = address.dynamic_parts_from_path(&second_line)?;
    let first_postcode = postcode.get_path(address_index)?;
    println!("{} = {:?}", first_postcode, first_postcode.get_value(&data));

    for line in address_line.enumerate_all_paths(&data) {
        println!("{} = {}", line, line.get_value(&data).unwrap_or(&json!(null)));
    }
    Ok(())
}

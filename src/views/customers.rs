//! Customer pages

use maud::{html, Markup};

use super::{layout, search_form, stored};
use crate::models::customer::Customer;

/// Customer list with the creation form
pub fn list(customers: &[Customer], search: Option<&str>) -> Markup {
    layout(
        "Customers",
        "customers",
        html! {
            (search_form("/customers/", search))
            table.table.table-striped {
                thead {
                    tr {
                        th { "#" }
                        th { "Name" }
                        th { "City" }
                        th { "Age" }
                        th {}
                    }
                }
                tbody {
                    @for customer in customers {
                        tr data-customer-id=(customer.id) {
                            td { (customer.id) }
                            td { (stored(&customer.name)) }
                            td { (stored(&customer.city)) }
                            td { (customer.age) }
                            td { (edit_form(customer)) }
                        }
                    }
                }
            }
            @if customers.is_empty() {
                p.text-muted { "No customers found." }
            }
            h2."mt-4" { "Add a customer" }
            form method="post" action="/customers/create" {
                div.form-group {
                    label for="name" { "Name" }
                    input.form-control id="name" name="name" required maxlength="64";
                }
                div.form-group {
                    label for="city" { "City" }
                    input.form-control id="city" name="city" required maxlength="64";
                }
                div.form-group {
                    label for="age" { "Age" }
                    input.form-control id="age" name="age" type="number" min="0" max="150" required;
                }
                button.btn.btn-primary type="submit" { "Create Customer" }
            }
        },
    )
}

/// Inline form prefilled with the stored values
fn edit_form(customer: &Customer) -> Markup {
    html! {
        details {
            summary { "Edit" }
            form method="post" action={ "/customers/" (customer.id) "/edit" } {
                input.form-control."mb-1" name="name" required maxlength="64" value=(stored(&customer.name));
                input.form-control."mb-1" name="city" required maxlength="64" value=(stored(&customer.city));
                input.form-control."mb-1" name="age" type="number" min="0" max="150" required value=(customer.age);
                button.btn.btn-sm.btn-secondary type="submit" { "Save" }
            }
        }
    }
}

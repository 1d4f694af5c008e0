//! Built-in US government form templates

use crate::template::{FieldSpec, FieldType, FormTemplate};

/// All built-in templates, in listing order
pub(crate) fn templates() -> Vec<(&'static str, FormTemplate)> {
    vec![("W-4", w4()), ("I-9", i9()), ("SS-5", ss5())]
}

fn w4() -> FormTemplate {
    FormTemplate::new(
        "Employee's Withholding Certificate",
        "IRS",
        "Tell your employer how much federal income tax to withhold",
    )
    .with_field(FieldSpec::new("firstName", "First name", FieldType::Text).required())
    .with_field(FieldSpec::new("lastName", "Last name", FieldType::Text).required())
    .with_field(FieldSpec::new("ssn", "Social Security Number", FieldType::Ssn).required())
    .with_field(FieldSpec::new("address", "Address", FieldType::Text).required())
    .with_field(
        FieldSpec::new("filingStatus", "Filing status", FieldType::Select)
            .required()
            .with_options([
                "Single or Married filing separately",
                "Married filing jointly",
                "Head of household",
            ]),
    )
    .with_field(FieldSpec::new("multipleJobs", "Multiple jobs?", FieldType::Boolean))
    .with_field(FieldSpec::new("dependentCredit", "Dependent credit", FieldType::Number))
    .with_field(FieldSpec::new("otherIncome", "Other income", FieldType::Number))
    .with_field(FieldSpec::new("deductions", "Deductions", FieldType::Number))
    .with_field(FieldSpec::new("extraWithholding", "Extra withholding", FieldType::Number))
    .with_required_doc("Social Security card")
    .with_required_doc("Previous W-4 (if updating)")
}

fn i9() -> FormTemplate {
    FormTemplate::new(
        "Employment Eligibility Verification",
        "USCIS",
        "Verify identity and employment authorization",
    )
    .with_field(FieldSpec::new("lastName", "Last name", FieldType::Text).required())
    .with_field(FieldSpec::new("firstName", "First name", FieldType::Text).required())
    .with_field(FieldSpec::new("middleInitial", "Middle initial", FieldType::Text))
    .with_field(FieldSpec::new("otherLastNames", "Other last names used", FieldType::Text))
    .with_field(FieldSpec::new("address", "Address", FieldType::Text).required())
    .with_field(FieldSpec::new("dob", "Date of birth", FieldType::Date).required())
    .with_field(FieldSpec::new("ssn", "Social Security Number", FieldType::Ssn).required())
    .with_field(FieldSpec::new("email", "Email", FieldType::Email))
    .with_field(FieldSpec::new("phone", "Phone", FieldType::Phone))
    .with_field(
        FieldSpec::new("citizenshipStatus", "Citizenship status", FieldType::Select)
            .required()
            .with_options([
                "US Citizen",
                "Noncitizen national",
                "Lawful permanent resident",
                "Alien authorized to work",
            ]),
    )
    .with_required_doc("List A document (passport) OR List B + List C documents")
}

fn ss5() -> FormTemplate {
    FormTemplate::new(
        "Application for a Social Security Card",
        "SSA",
        "Apply for new, replacement, or corrected Social Security card",
    )
    .with_field(FieldSpec::new("fullName", "Full name", FieldType::Text).required())
    .with_field(FieldSpec::new("nameAtBirth", "Name at birth", FieldType::Text))
    .with_field(FieldSpec::new("dob", "Date of birth", FieldType::Date).required())
    .with_field(FieldSpec::new("placeOfBirth", "Place of birth", FieldType::Text).required())
    .with_field(
        FieldSpec::new("citizenship", "Citizenship", FieldType::Select)
            .required()
            .with_options([
                "US Citizen",
                "Legal Alien Allowed to Work",
                "Legal Alien Not Allowed to Work",
                "Other",
            ]),
    )
    .with_field(
        FieldSpec::new("ethnicity", "Ethnicity", FieldType::Select)
            .with_options(["Hispanic or Latino", "Not Hispanic or Latino"]),
    )
    .with_field(FieldSpec::new("race", "Race", FieldType::Multiselect))
    .with_field(
        FieldSpec::new("sex", "Sex", FieldType::Select)
            .required()
            .with_options(["Male", "Female"]),
    )
    .with_field(FieldSpec::new("mothersMaidenName", "Mother's maiden name", FieldType::Text))
    .with_field(FieldSpec::new("fathersName", "Father's name", FieldType::Text))
    .with_field(FieldSpec::new("previousSSN", "Previous SSN (if any)", FieldType::Ssn))
    .with_field(FieldSpec::new("phone", "Phone", FieldType::Phone).required())
    .with_required_doc("Proof of citizenship")
    .with_required_doc("Proof of identity")
    .with_required_doc("Proof of age")
}

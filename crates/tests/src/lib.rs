#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod access_tests;

#[cfg(test)]
mod resident_tests;

#[cfg(test)]
mod finance_tests;

#[cfg(test)]
mod expense_tests;

#[cfg(test)]
mod quotation_tests;

#[cfg(test)]
mod complaint_tests;

#[cfg(test)]
mod amenity_tests;

#[cfg(test)]
mod notice_tests;

#[cfg(test)]
mod security_tests;

#[cfg(test)]
mod dashboard_tests;

//! Business rules for the to-do API, expressed in terms of driving ports (what the API layer calls)
//! and driven ports (what the business logic calls to reach storage).

pub mod todo;

#[cfg(test)]
pub mod test_util;

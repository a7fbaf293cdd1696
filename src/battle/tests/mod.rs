pub mod common;



#[cfg(test)]
mod test_action_prevention;



#[cfg(test)]
mod test_session;

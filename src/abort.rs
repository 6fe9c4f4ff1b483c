//! Module implementing a panic hook that reports panics through the logger.
//!
//! A panic inside a NIF is caught at the boundary and raised in the calling
//! process, so the hook only needs to make sure the message is not lost.

use std::{any::Any, panic};

/// Sets the panic hook to log the panic message and location.
pub fn set_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let message = payload_message(info.payload());
        match info.location() {
            Some(location) => log::error!(
                "panicked at {}:{}:{}: {}",
                location.file(),
                location.line(),
                location.column(),
                message,
            ),
            None => log::error!("panicked: {}", message),
        }
    }));
}

fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "Box<dyn Any>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_payload_messages() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(payload_message(&*payload), "static");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(payload_message(&*payload), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(payload_message(&*payload), "Box<dyn Any>");
    }
}

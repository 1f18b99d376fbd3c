use crate::common::{
    Request, Response, ALL_MESSAGE, GET_MESSAGE, NOT_FOUND_MESSAGE, SET_MESSAGE,
};
use crate::engines::KvsEngine;

/// Runs a decoded request against `engine` and shapes the reply.
///
/// Never fails: decode errors are caught before a request exists,
/// and an absent key is the `NotFound` response.
pub fn dispatch<E: KvsEngine>(engine: &E, request: Request) -> Response {
    match request {
        Request::Set { key, value } => {
            engine.set(key.clone(), value.clone());
            Response::Set {
                message: SET_MESSAGE.to_owned(),
                key,
                value,
            }
        }
        Request::Get { key } => match engine.get(&key) {
            Some(value) => Response::Get {
                message: GET_MESSAGE.to_owned(),
                value,
            },
            None => Response::NotFound {
                message: NOT_FOUND_MESSAGE.to_owned(),
                key,
            },
        },
        Request::All => Response::All {
            message: ALL_MESSAGE.to_owned(),
            values: engine.all(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KvStore;

    #[test]
    fn set_then_get() {
        let store = KvStore::new();
        let set = dispatch(
            &store,
            Request::Set {
                key: "foo".to_owned(),
                value: "bar".to_owned(),
            },
        );
        assert_eq!(
            set,
            Response::Set {
                message: "Value set successfully!".to_owned(),
                key: "foo".to_owned(),
                value: "bar".to_owned(),
            }
        );

        let get = dispatch(&store, Request::Get { key: "foo".to_owned() });
        assert_eq!(
            get,
            Response::Get {
                message: "Value get successfully!".to_owned(),
                value: "bar".to_owned(),
            }
        );
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = KvStore::new();
        let response = dispatch(&store, Request::Get { key: "foo".to_owned() });
        assert_eq!(
            response,
            Response::NotFound {
                message: "Key not found!".to_owned(),
                key: "foo".to_owned(),
            }
        );
    }

    #[test]
    fn all_on_empty_store() {
        let store = KvStore::new();
        match dispatch(&store, Request::All) {
            Response::All { message, values } => {
                assert_eq!(message, "Values get successfully!");
                assert!(values.is_empty());
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}

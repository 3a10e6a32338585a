mod push;

pub use push::{
    BatchOutcome, FcmPushTransport, IPushTransport, InMemoryPushTransport, LogPushTransport,
    PushDispatcher, PushError, PushMessage, PushPayload, TokenOutcome, MAX_BATCH_SIZE,
};

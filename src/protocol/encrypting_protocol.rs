use crate::{
    constants::{ENCRYPTION_KEY_SIZE, ENCRYPTION_NONCE_SIZE, ENCRYPTION_TAG_SIZE},
    protocol::{Message, Phase, Protocol, ProtocolError, framing::segment_size},
};
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng, Payload},
};
use std::io::{Read, Write};

/// Decorator that seals the payload with ChaCha20-Poly1305 before handing
/// the message to the inner protocol, and opens it after the inner protocol
/// decodes.
///
/// Metadata and header pass through in clear. The sealed payload is
/// `nonce(12) || ciphertext || tag(16)`, with a fresh random nonce per
/// message and the message id bound as associated data, so a payload cannot
/// be replayed under a different correlation id.
pub struct EncryptingProtocol<P> {
    inner: P,
    cipher: ChaCha20Poly1305,
}

impl<P: Protocol> EncryptingProtocol<P> {
    pub fn new(inner: P, key: &[u8; ENCRYPTION_KEY_SIZE]) -> Self {
        Self {
            inner,
            cipher: ChaCha20Poly1305::new(Key::from_slice(key)),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn seal(&self, message_id: u64, plaintext: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let aad = message_id.to_be_bytes();

        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad: &aad,
                },
            )
            .map_err(|_| ProtocolError::Encryption)?;

        let mut sealed = Vec::with_capacity(ENCRYPTION_NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend(ciphertext);
        Ok(sealed)
    }

    fn open(&self, message_id: u64, sealed: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        if sealed.len() < ENCRYPTION_NONCE_SIZE + ENCRYPTION_TAG_SIZE {
            return Err(ProtocolError::Decryption);
        }

        let (nonce, ciphertext) = sealed.split_at(ENCRYPTION_NONCE_SIZE);
        let aad = message_id.to_be_bytes();

        self.cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: &aad,
                },
            )
            .map_err(|_| ProtocolError::Decryption)
    }
}

impl<P: Protocol> Protocol for EncryptingProtocol<P> {
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError> {
        let sealed = Message {
            header: message.header,
            metadata: message.metadata.clone(),
            payload: self.seal(message.header.message_id, &message.payload)?,
        };

        self.inner.encode_message(&sealed, sink)
    }

    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        let mut message = self.inner.decode_message(source)?;

        message.payload = self
            .open(message.header.message_id, &message.payload)
            .inspect_err(|_| {
                tracing::debug!(
                    message_id = message.header.message_id,
                    "payload failed authentication"
                );
            })?;

        // Describe the payload the caller now holds, not the sealed form.
        message.header.payload_size = segment_size(message.payload.len(), Phase::Payload)?;

        Ok(message)
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for EncryptingProtocol<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptingProtocol")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

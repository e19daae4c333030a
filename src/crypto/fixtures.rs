// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixed RSA-2048 material for signature tests.

/// SHA-256 hex digest of `SIGNED_CONTENT`; this string is what was signed.
pub const SIGNED_HASH: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

/// Document bytes whose digest is `SIGNED_HASH`.
pub const SIGNED_CONTENT: &[u8] = b"test";

/// RSASSA-PKCS1-v1_5 / SHA-256 signature of `SIGNED_HASH` under the key below.
pub const HASH_SIGNATURE_BASE64: &str = "f9WWTpIZkKNVMQ6fUvkBuVbYA78wn/xznKOfNMdRSLCvRcz4iFJw+CAI9+uOkVJn8MsoKRJLhp0nKl2ZIyLcrw1A0KLo4ZqTeaXbH8gHOuSz3hdYOid4WyNL9+FkhJdJZcBxL+dCxdVbVUBLVT1rvsl8S/xJ6LqfoeyPDhJipRq42j/RLJt+SqAnrNCdvbJjLOUWfNjSgerMUNVePOB5xTq9jAZa9soAmVGyOjNqn9EIFglxLHCWsHq7N0BOIBWlJv4YTSKji5lypYfs+GdQzhlgkt8LwwSfmm3gR9xYyvkjKmcDG4LKGa32ghIQlN4i2ttg3vZ7ISNwwRxCInvvwg==";

pub const SPKI_PUBLIC_KEY_PEM: &str = "-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAt1Pf+PB3vW2diY8HK62s
3ySsTqW7YtqxD7BpZeThws2Ojq9TAZ4dlo6kvjRAG5DCSUYfyIUrbCLrKfAYAMEh
rru5W2d6vVzAyMOlaGxuujMhLlJ4NRZK1Blpa5W4ANtm/zNUSmgb64KzQ11J9SgB
QhKYKRgVmb9P1QwOgEEdYzPT/LEwFktA6ayjXFPsUvZNnPeachRl1kZDxe1+jcw5
zCh6qnHrrqGIflutbdWwZeQNydhqFV7efcf0AFbGC5ToG6fTeulIuOLdSr7BDAWo
oeS1xf5CSQ83fAQSO+w1Nmcdrn2bXcQ3jF6bPvvic6zrgtB/MOzkR6Xd1XD/Lf+/
dQIDAQAB
-----END PUBLIC KEY-----";

pub const SPKI_PUBLIC_KEY_BASE64: &str = "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAt1Pf+PB3vW2diY8HK62s3ySsTqW7YtqxD7BpZeThws2Ojq9TAZ4dlo6kvjRAG5DCSUYfyIUrbCLrKfAYAMEhrru5W2d6vVzAyMOlaGxuujMhLlJ4NRZK1Blpa5W4ANtm/zNUSmgb64KzQ11J9SgBQhKYKRgVmb9P1QwOgEEdYzPT/LEwFktA6ayjXFPsUvZNnPeachRl1kZDxe1+jcw5zCh6qnHrrqGIflutbdWwZeQNydhqFV7efcf0AFbGC5ToG6fTeulIuOLdSr7BDAWooeS1xf5CSQ83fAQSO+w1Nmcdrn2bXcQ3jF6bPvvic6zrgtB/MOzkR6Xd1XD/Lf+/dQIDAQAB";

pub const PKCS1_PUBLIC_KEY_PEM: &str = "-----BEGIN RSA PUBLIC KEY-----
MIIBCgKCAQEAt1Pf+PB3vW2diY8HK62s3ySsTqW7YtqxD7BpZeThws2Ojq9TAZ4d
lo6kvjRAG5DCSUYfyIUrbCLrKfAYAMEhrru5W2d6vVzAyMOlaGxuujMhLlJ4NRZK
1Blpa5W4ANtm/zNUSmgb64KzQ11J9SgBQhKYKRgVmb9P1QwOgEEdYzPT/LEwFktA
6ayjXFPsUvZNnPeachRl1kZDxe1+jcw5zCh6qnHrrqGIflutbdWwZeQNydhqFV7e
fcf0AFbGC5ToG6fTeulIuOLdSr7BDAWooeS1xf5CSQ83fAQSO+w1Nmcdrn2bXcQ3
jF6bPvvic6zrgtB/MOzkR6Xd1XD/Lf+/dQIDAQAB
-----END RSA PUBLIC KEY-----";

/// Unrelated key pair's public half.
pub const OTHER_PUBLIC_KEY_BASE64: &str = "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA205k6R1SJETXDBFlbLu5t7DmU22zZuvCTEfkyHqkkde+0Mpgz6wAG033uXXjo45tzdGkPHQP/9vu5NIcKblIbWtvTQQaM0BsuQKTj657vJC3bdRIcnhOFD55OS3lEtWB2e4cmdYL2+ajCTpo47GWwq9icWscDd5buhKoJhXdsqCCqKqh931PvCaEdo9AEOquUVHmxI3TU7dLrcRetraxiPpPX3wQGnAm5OC3nzoyhNXPZq0FamyGX8ulOfWMhU+1tS4mgTYolLFRo3Bx7ZFxy6jSLO0Km+5YeLCu5e1LOh+9ArwdrNN5YUlPNKfpn+taVNVZLPrm/l2+oCD+SZdD/wIDAQAB";

use lakers_keygen::{KeyGenError, KeyPairGenerator, PrivateKey, PublicKey};
use lakers_keygen_crypto::default_crypto;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use pyo3::wrap_pyfunction;

fn to_py_err(err: KeyGenError) -> PyErr {
    PyValueError::new_err(format!("{}", err))
}

/// Generate a P-256 key pair, returned as (private_key, public_key) bytes of 32 bytes each.
///
/// The public key is the x coordinate of the point.
#[pyfunction]
fn p256_generate_key_pair(py: Python<'_>) -> PyResult<(&PyBytes, &PyBytes)> {
    let (private_key, public_key) = KeyPairGenerator::new(default_crypto())
        .generate()
        .map_err(to_py_err)?
        .into_parts();
    Ok((
        PyBytes::new(py, private_key.as_bytes()),
        PyBytes::new(py, public_key.as_bytes()),
    ))
}

#[pyfunction]
fn p256_public_key<'py>(py: Python<'py>, private_key: &[u8]) -> PyResult<&'py PyBytes> {
    let private_key = PrivateKey::from_slice(private_key).map_err(to_py_err)?;
    let public_key = KeyPairGenerator::new(default_crypto())
        .public_key(&private_key)
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, public_key.as_bytes()))
}

#[pyfunction]
fn p256_ecdh<'py>(
    py: Python<'py>,
    private_key: &[u8],
    public_key: &[u8],
) -> PyResult<&'py PyBytes> {
    let private_key = PrivateKey::from_slice(private_key).map_err(to_py_err)?;
    let public_key = PublicKey::from_slice(public_key).map_err(to_py_err)?;
    let secret = KeyPairGenerator::new(default_crypto())
        .ecdh(&private_key, &public_key)
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, &secret))
}

// this name must match `lib.name` in `Cargo.toml`
#[pymodule]
#[pyo3(name = "lakers_keygen")]
fn lakers_keygen_python(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(p256_generate_key_pair, m)?)?;
    m.add_function(wrap_pyfunction!(p256_public_key, m)?)?;
    m.add_function(wrap_pyfunction!(p256_ecdh, m)?)?;
    Ok(())
}

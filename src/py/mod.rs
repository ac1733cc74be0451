use log::debug;
use numpy::{IntoPyArray, PyArray1};
use pyo3::{
    exceptions::{PyIndexError, PyRuntimeError, PyValueError},
    pyclass, pymethods, pymodule,
    types::PyModule,
    PyErr, PyResult, Python,
};

use crate::base::{DbId, Distance};
use crate::error::KnnError;
use crate::knn::{DistancePair, KnnHeap, KnnList};

impl From<KnnError> for PyErr {
    fn from(error: KnnError) -> Self {
        let message = error.to_string();
        match error {
            KnnError::IndexOutOfRange { .. } | KnnError::BeforeStart | KnnError::Empty => PyIndexError::new_err(message),
            KnnError::InvalidState(_) => PyRuntimeError::new_err(message),
            _ => PyValueError::new_err(message),
        }
    }
}

fn as_tuple(pair: &DistancePair) -> (Distance, DbId) {
    (pair.distance(), pair.id())
}

#[pyclass(name = "KnnHeap")]
struct PyKnnHeap {
    inner: KnnHeap,
}

#[pymethods]
impl PyKnnHeap {
    #[new]
    fn new(k: usize) -> PyResult<Self> {
        Ok(Self {
            inner: KnnHeap::new(k)?,
        })
    }

    /// Adds a candidate and returns the new boundary distance
    fn add(&mut self, distance: Distance, id: DbId) -> PyResult<Distance> {
        Ok(self.inner.add(distance, id)?)
    }

    fn boundary_distance(&self) -> Distance {
        self.inner.boundary_distance()
    }

    fn poll(&mut self) -> PyResult<(Distance, DbId)> {
        Ok(as_tuple(&self.inner.poll()?))
    }

    fn peek(&self) -> PyResult<(Distance, DbId)> {
        Ok(as_tuple(self.inner.peek()?))
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn finalize(&mut self) -> PyKnnList {
        PyKnnList {
            inner: self.inner.finalize(),
        }
    }
}

#[pyclass(name = "KnnList")]
struct PyKnnList {
    inner: KnnList,
}

#[pymethods]
impl PyKnnList {
    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn get(&self, index: usize) -> PyResult<(Distance, DbId)> {
        Ok(as_tuple(self.inner.get(index)?))
    }

    fn knn_distance(&self) -> Distance {
        self.inner.knn_distance()
    }

    fn ids(&self) -> Vec<DbId> {
        self.inner.ids()
    }

    fn distances<'py>(&self, py: Python<'py>) -> &'py PyArray1<Distance> {
        self.inner.distances().into_pyarray(py)
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn knn_heap(_py: Python, module: &PyModule) -> PyResult<()> {
    // Init logging
    pyo3_log::init();
    debug!("Loading knn-heap extension");

    module.add_class::<PyKnnHeap>()?;
    module.add_class::<PyKnnList>()?;

    Ok(())
}

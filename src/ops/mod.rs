// Product kernels.  Each shape/representation pair gets its own small
// free function; the public methods only validate operands and dispatch.

mod spgemm;
mod spmv;

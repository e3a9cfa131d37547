//! Color representation: conversion, hex notation and catalog records.

pub mod catalog;
pub mod convert;
pub mod hex;

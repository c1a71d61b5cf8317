mod slice;
